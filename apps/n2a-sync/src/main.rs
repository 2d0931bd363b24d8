use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = n2a_sync::Args::parse();
	n2a_sync::run(args).await
}
