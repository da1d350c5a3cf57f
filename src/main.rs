use clap::Parser;
use etiqueta::{
    ColumnOverrides, LabelPipeline, LayoutParameters, PipelineError, Table, build_labels,
    resolve_columns,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate 51×25 mm product labels from a CSV file.
#[derive(Parser, Debug)]
#[command(name = "etiqueta", version, about)]
struct Cli {
    /// Product CSV (UTF-8 or Latin-1)
    input: PathBuf,

    /// Destination PDF, one page per label
    #[arg(short, long, default_value = "labels.pdf")]
    output: PathBuf,

    /// Also render the first label to this PNG
    #[arg(long)]
    preview: Option<PathBuf>,

    /// JSON file overriding any subset of the layout parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Column holding the product title
    #[arg(long, value_name = "COLUMN")]
    title_col: Option<String>,

    /// Column holding the SKU
    #[arg(long, value_name = "COLUMN")]
    sku_col: Option<String>,

    /// Column holding the barcode digits
    #[arg(long, value_name = "COLUMN")]
    barcode_col: Option<String>,

    /// Column holding the number of copies per row
    #[arg(long, value_name = "COLUMN")]
    quantity_col: Option<String>,
}

fn load_params(cli: &Cli) -> Result<LayoutParameters, PipelineError> {
    match &cli.params {
        None => Ok(LayoutParameters::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text)
                .map_err(|err| PipelineError::Config(format!("{}: {err}", path.display())))
        }
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let table = Table::from_path(&cli.input)?;
    let overrides = ColumnOverrides {
        title: cli.title_col.clone(),
        sku: cli.sku_col.clone(),
        barcode: cli.barcode_col.clone(),
        quantity: cli.quantity_col.clone(),
    };
    let map = resolve_columns(&table, &overrides);
    let records = build_labels(&table, &map);
    if records.is_empty() {
        return Err(PipelineError::Config(format!(
            "{} produced no labels",
            cli.input.display()
        )));
    }

    let pipeline = LabelPipeline::new(load_params(&cli)?);

    if let Some(preview_path) = &cli.preview {
        let image = pipeline.preview(&records[0]);
        image
            .save(preview_path)
            .map_err(|err| PipelineError::Config(format!("{}: {err}", preview_path.display())))?;
        log::info!("wrote preview {}", preview_path.display());
    }

    pipeline.generate_pdf_file(&records, &cli.output)?;
    println!("{}: {} labels", cli.output.display(), records.len());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
