//! houseprice: serves the house price form, or predicts once from the command line.

use anyhow::Result;
use clap::Parser;

use houseprice::api;
use houseprice::cli::{Cli, Commands};
use houseprice::common::config::AppCfg;
use houseprice::common::log;
use houseprice::inference;
use houseprice::model::service::load_model;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = AppCfg::load()?.with_model_path(cli.model.clone());

    match cli.command {
        Commands::Serve { bind } => {
            let cfg = cfg.with_bind(bind.as_deref())?;
            log::init(&cfg)?;
            let model = load_model(&cfg)?;
            api::serve(&cfg, model).await?;
        }
        Commands::Predict(args) => {
            log::init(&cfg)?;
            let model = load_model(&cfg)?;
            let prediction = inference::predict(&model, args.into())?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                println!("{}", prediction.text);
            }
        }
    }
    Ok(())
}
