//! Command line tool to load a dataset and print some of its examples

use anyhow::anyhow;
use burn::{config::Config as _, data::dataset::Dataset as _};
use pico_args::Arguments;
use textattack_datasets::{
    cli::datasets::Dataset, datasets::movie_review_sentiment, Config, Sample,
};

const HELP: &str = "\
Usage: preview DATASET [OPTIONS]

Arguments:
  DATASET              The dataset to load (e.g., 'mr')

Options:
  -h, --help           Print help
  -o, --offset         The line to start reading from (defaults to 0)
  -n, --num-samples    Number of examples to print (defaults to 10)
  -c, --config         A JSON config file (defaults to TEXTATTACK_* environment variables)
  --random             Print random examples instead of the first ones
  --json               Print examples as JSON lines
";

#[derive(Debug)]
struct Args {
    dataset: String,
    offset: usize,
    num_samples: usize,
    config: Option<String>,
    random: bool,
    json: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            offset: pargs.opt_value_from_str(["-o", "--offset"])?.unwrap_or(0),
            num_samples: pargs
                .opt_value_from_str(["-n", "--num-samples"])?
                .unwrap_or(10),
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            random: pargs.contains("--random"),
            json: pargs.contains("--json"),
            dataset: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env(),
    };

    match Dataset::try_from(args.dataset.as_str())? {
        Dataset::MovieReviewSentiment => {
            let dataset = movie_review_sentiment::Dataset::load(&config, args.offset).await?;

            log::info!("Loaded {} examples", dataset.len());

            let rows: Vec<movie_review_sentiment::Item> = if args.random {
                dataset
                    .get_samples(args.num_samples)
                    .into_iter()
                    .map(|(text, label)| Sample::new(text, label))
                    .collect()
            } else {
                dataset.iter().take(args.num_samples).collect()
            };

            print_rows(&rows, args.json)?;
        }
    }

    Ok(())
}

fn print_rows(rows: &[movie_review_sentiment::Item], json: bool) -> anyhow::Result<()> {
    for row in rows {
        if json {
            println!("{}", serde_json::to_string(row)?);
        } else {
            println!("{}\t{}", row.label.id(), row.text);
        }
    }

    Ok(())
}
