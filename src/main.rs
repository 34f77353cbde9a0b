fn main() -> anyhow::Result<()> {
    moodweek::Cli::run()
}
