#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use inflation_map::config::TooltipConfig;
    use inflation_map::constants::{FRED_API_KEY_ENV, VALUE_ATTRIBUTE};
    use inflation_map::fred::Seasonality;
    use inflation_map::update::{run_update, UpdateOptions};

    /// Refresh the US map page with the latest per-state FRED observations
    #[derive(Debug, Parser)]
    #[command(name = "update-map", version, about)]
    struct Args {
        /// Source SVG template
        #[arg(long, default_value = "us-map-template.svg")]
        svg: PathBuf,

        /// HTML page to update (created when missing)
        #[arg(long, default_value = "index.html")]
        html: PathBuf,

        /// SA (seasonally adjusted) or NSA
        #[arg(long, default_value = "SA")]
        seasonal: Seasonality,

        /// FRED API key; prefer the environment variable outside local testing
        #[arg(long, env = FRED_API_KEY_ENV, hide_env_values = true)]
        key: Option<String>,

        /// Attribute that carries each state's value
        #[arg(long, default_value = VALUE_ATTRIBUTE)]
        attribute: String,

        /// Script referenced by a newly rendered page
        #[arg(long, default_value = "tooltip.js")]
        script: String,
    }

    pub fn main() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();

        let options = UpdateOptions {
            svg_path: args.svg,
            html_path: args.html,
            seasonality: args.seasonal,
            api_key: args.key,
            tooltip: TooltipConfig {
                value_attribute: args.attribute,
                ..TooltipConfig::default()
            },
            script_src: args.script,
        };

        match run_update(&options) {
            Ok(report) => {
                log::info!(
                    "Updated {} ({} states with data{})",
                    report.html_path.display(),
                    report.states_with_data,
                    report
                        .backup_path
                        .map(|backup| format!(", backup at {}", backup.display()))
                        .unwrap_or_default()
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    panic!("update-map only runs on native targets");
}
