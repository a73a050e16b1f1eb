use anyhow::Result;
use tfsmith::cli::App;

fn main() -> Result<()> {
    let mut app = App::from_args()?;
    let args = tfsmith::cli::Args::parse_args();

    app.run(args)
}
