use clap::Parser;
use guidepost_cli::{CliArgs, GuidepostCli};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let result = match GuidepostCli::from_args("guidepost", &args) {
        Ok(cli) => cli.run(args).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
