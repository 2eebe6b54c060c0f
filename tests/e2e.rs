mod common;

use cell_counter::image::io::{load_image, save_mask_png};
use cell_counter::label::Connectivity;
use cell_counter::sink::{CsvTableSink, MemorySink, ResultSink};
use cell_counter::image::Image;
use cell_counter::{CellCounter, PipelineConfig, Polarity, SegmentationError};
use common::init_logging;
use common::synthetic_image::{blob_field_u8, disc_grid, Disc};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cell_counter_{name}_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn counts_dark_cells_on_bright_background() {
    init_logging();
    let (width, height) = (240usize, 160usize);
    let discs = disc_grid(width, height, 6, 4, 9.0);
    let buffer = blob_field_u8(width, height, &discs, 40, 210);
    let image = Image::from_u8(width, height, buffer).unwrap();

    let cfg = PipelineConfig::cell_counting(Connectivity::Four);
    let run = CellCounter::new(cfg).run(&image).unwrap();

    assert_eq!(run.num_regions(), 24, "expected one region per disc");
    let rows = run.rows();
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.index, i);
        assert!(
            row.area > 150 && row.area < 350,
            "disc {i} has implausible area {}",
            row.area
        );
        // Measured on the raw image: mostly disc pixels, a few halo pixels.
        assert!(
            row.mean_intensity < 125.0,
            "disc {i} mean {:.2}",
            row.mean_intensity
        );
    }
    // First-occurrence order follows the raster order of the disc tops.
    assert_eq!(run.labels.get(discs[0].cx as usize, discs[0].cy as usize), 1);
    assert_eq!(run.labels.get(discs[5].cx as usize, discs[5].cy as usize), 6);
}

#[test]
fn areas_sum_to_foreground_count() {
    let (width, height) = (97usize, 131usize);
    let discs = [
        Disc { cx: 20.0, cy: 30.0, radius: 12.0 },
        Disc { cx: 70.0, cy: 40.0, radius: 8.0 },
        Disc { cx: 45.0, cy: 100.0, radius: 15.0 },
    ];
    let image = Image::from_u8(width, height, blob_field_u8(width, height, &discs, 30, 200)).unwrap();
    for conn in [Connectivity::Four, Connectivity::Eight] {
        let run = CellCounter::new(PipelineConfig::cell_counting(conn))
            .run(&image)
            .unwrap();
        let total: u64 = run.rows().iter().map(|r| r.area).sum();
        assert_eq!(total as usize, run.mask.count_foreground());
        assert_eq!(run.labels.count_foreground(), run.mask.count_foreground());
        assert_eq!(run.num_regions(), 3);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let (width, height) = (128usize, 200usize);
    let discs = disc_grid(width, height, 4, 7, 6.5);
    let image = Image::from_u8(width, height, blob_field_u8(width, height, &discs, 60, 180)).unwrap();
    let cfg = PipelineConfig::cell_counting(Connectivity::Eight).with_color_seed(42);

    let a = CellCounter::new(cfg.clone()).run(&image).unwrap();
    let b = CellCounter::new(cfg.clone()).run(&image).unwrap();
    let c = CellCounter::new(cfg.with_gpu_offload(true)).run(&image).unwrap();
    for other in [&b, &c] {
        assert_eq!(a.mask, other.mask);
        assert_eq!(a.labels, other.labels);
        assert_eq!(a.regions, other.regions);
        assert_eq!(a.colors, other.colors);
        assert_eq!(a.threshold, other.threshold);
    }
}

#[test]
fn uniform_image_has_no_regions() {
    let image = Image::from_u16(32, 32, vec![1200u16; 32 * 32]).unwrap();
    let run = CellCounter::new(PipelineConfig::new(Connectivity::Four))
        .run(&image)
        .unwrap();
    assert!(run.threshold.degenerate);
    assert_eq!(run.num_regions(), 0);
    assert!(run.rows().is_empty());
    assert!(run.colors.data.iter().all(|&c| c == 0));
}

#[test]
fn bright_polarity_without_inversion_selects_background() {
    let (width, height) = (64usize, 64usize);
    let discs = [Disc { cx: 32.0, cy: 32.0, radius: 10.0 }];
    let image = Image::from_u8(width, height, blob_field_u8(width, height, &discs, 20, 230)).unwrap();
    let cfg = PipelineConfig::new(Connectivity::Four)
        .with_polarity(Polarity::Bright)
        .with_invert_mask(false);
    let run = CellCounter::new(cfg).run(&image).unwrap();
    // The bright surround is one connected region enclosing the disc.
    assert_eq!(run.num_regions(), 1);
    assert!(run.rows()[0].mean_intensity > 200.0);
}

#[test]
fn float_input_with_nan_is_rejected() {
    let mut data = vec![0.5f32; 16];
    data[3] = f32::NAN;
    let image = Image::from_f32(4, 4, data).unwrap();
    let err = CellCounter::new(PipelineConfig::new(Connectivity::Four))
        .run(&image)
        .unwrap_err();
    assert!(matches!(err, SegmentationError::UnsupportedPixelType { .. }));
}

#[test]
fn float_input_with_infinity_is_rejected() {
    let (width, height) = (16usize, 16usize);
    let discs = [Disc { cx: 8.0, cy: 8.0, radius: 4.0 }];
    let mut data: Vec<f32> = blob_field_u8(width, height, &discs, 20, 200)
        .into_iter()
        .map(f32::from)
        .collect();
    let finite = Image::from_f32(width, height, data.clone()).unwrap();
    let cfg = PipelineConfig::new(Connectivity::Four);
    assert_eq!(CellCounter::new(cfg.clone()).run(&finite).unwrap().num_regions(), 1);

    data[0] = f32::INFINITY;
    let image = Image::from_f32(width, height, data).unwrap();
    let err = CellCounter::new(cfg).run(&image).unwrap_err();
    assert!(matches!(err, SegmentationError::UnsupportedPixelType { .. }));
}

#[test]
fn csv_export_through_sink() {
    let (width, height) = (80usize, 40usize);
    let discs = [
        Disc { cx: 20.0, cy: 20.0, radius: 7.0 },
        Disc { cx: 60.0, cy: 20.0, radius: 7.0 },
    ];
    let image = Image::from_u8(width, height, blob_field_u8(width, height, &discs, 50, 200)).unwrap();
    let dir = scratch_dir("csv");
    let path = dir.join("table.csv");

    let counter = CellCounter::new(PipelineConfig::cell_counting(Connectivity::Four));
    let mut sink = CsvTableSink::create(&path).unwrap();
    let run = counter.run_with_sinks(&image, &mut sink, None).unwrap();
    drop(sink);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Index,Area in pixels,Mean intensity");
    assert_eq!(lines.len(), 1 + run.num_regions() as usize);
    assert!(lines[1].starts_with("0,"));
    assert!(lines[2].starts_with("1,"));

    let mut memory = MemorySink::default();
    memory.consume(&run.rows()).unwrap();
    assert_eq!(memory.rows, run.rows());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn mask_png_round_trips_through_loader() {
    let (width, height) = (30usize, 20usize);
    let discs = [Disc { cx: 15.0, cy: 10.0, radius: 5.0 }];
    let image = Image::from_u8(width, height, blob_field_u8(width, height, &discs, 10, 240)).unwrap();
    let run = CellCounter::new(PipelineConfig::cell_counting(Connectivity::Eight))
        .run(&image)
        .unwrap();

    let dir = scratch_dir("mask");
    let path = dir.join("mask.png");
    save_mask_png(&run.mask, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.dims(), (width, height));
    let foreground = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| loaded.sample(x, y) > 0.0)
        .count();
    assert_eq!(foreground, run.mask.count_foreground());
    fs::remove_dir_all(&dir).ok();
}
