use ammo_tester::error::AppResult;

fn main() -> AppResult<()> {
    ammo_tester::entry::run()
}
