use chipscan::cli;

fn main() -> anyhow::Result<()> {
    chipscan::init_logging()?;
    cli::run()
}
