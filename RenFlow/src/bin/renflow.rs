fn main() -> anyhow::Result<()> {
    renflow::cli::run_cli()
}
