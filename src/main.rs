use cell_counter::config::{load_config, CellCountToolConfig};
use cell_counter::image::io::{load_image, save_mask_png, write_json_file};
use cell_counter::sink::{CsvTableSink, PngRasterSink, RasterSink, ResultSink};
use cell_counter::CellCounter;
use log::{info, warn};
use std::env;
use std::error::Error;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let CellCountToolConfig {
        input,
        pipeline,
        output,
    } = load_config(Path::new(&config_path))?;

    let image = load_image(&input)?;
    info!(
        "loaded {} ({}x{}, {})",
        input.display(),
        image.width(),
        image.height(),
        image.pixel_type()
    );

    let export_table = pipeline.export_table;
    let counter = CellCounter::new(pipeline);
    let run = counter.run(&image)?;
    info!("Objects found: {}", run.num_regions());

    match (&output.table_csv, export_table) {
        (Some(path), true) => {
            CsvTableSink::create(path)?.consume(&run.rows())?;
            println!("Saved {} table rows to {}", run.regions.len(), path.display());
        }
        (Some(path), false) => warn!(
            "tableCsv {} given but exportTable is off; skipping",
            path.display()
        ),
        (None, true) => warn!("exportTable is on but no tableCsv path is configured"),
        (None, false) => {}
    }
    if let Some(path) = &output.labels_png {
        PngRasterSink::new(path).consume(&run.colors)?;
        println!("Saved label rendering to {}", path.display());
    }
    if let Some(path) = &output.mask_png {
        save_mask_png(&run.mask, path)?;
        println!("Saved mask to {}", path.display());
    }
    if let Some(path) = &output.report_json {
        write_json_file(path, &run.report())?;
        println!("Saved run report to {}", path.display());
    }

    println!("Objects found: {}", run.num_regions());
    Ok(())
}

fn usage() -> String {
    "Usage: cell_counter <config.json>".to_string()
}
