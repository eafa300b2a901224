use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::domain::HouseAttributes;

#[derive(Parser, Debug)]
#[command(name = "houseprice", version, about = "King County house price prediction form")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Model artifact path (overrides HOUSEPRICE_MODEL_PATH)"
    )]
    pub model: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the prediction form over HTTP.
    Serve {
        #[arg(long, help = "Listen address (overrides HOUSEPRICE_BIND)")]
        bind: Option<String>,
    },
    /// Predict one house price and print it.
    Predict(PredictArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[arg(long)]
    pub bedrooms: u32,
    #[arg(long)]
    pub bathrooms: u32,
    #[arg(long)]
    pub sqft_living: u32,
    #[arg(long)]
    pub sqft_lot: u32,
    #[arg(long)]
    pub floors: u32,
    #[arg(long, help = "1 if the house overlooks the waterfront, else 0")]
    pub waterfront: u32,
    #[arg(long, default_value_t = 0)]
    pub view: u32,
    #[arg(long)]
    pub condition: u32,
    #[arg(long)]
    pub grade: u32,
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub long: f64,
}

impl From<PredictArgs> for HouseAttributes {
    fn from(args: PredictArgs) -> Self {
        HouseAttributes {
            bedrooms: args.bedrooms,
            bathrooms: args.bathrooms,
            sqft_living: args.sqft_living,
            sqft_lot: args.sqft_lot,
            floors: args.floors,
            waterfront: args.waterfront,
            view: args.view,
            condition: args.condition,
            grade: args.grade,
            lat: args.lat,
            long: args.long,
        }
    }
}
