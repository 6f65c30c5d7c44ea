use anyhow::Result;

fn main() -> Result<()> {
    beerlog_cli::main_entry()
}
