#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::indexing_slicing)]

use std::{error::Error, time::Instant};

use plotters::prelude::*;
use primemap::{
    ChainingMap, HashFn, HashMapExtensions, OpenAddressingMap, hash_function_1, hash_function_2,
};
use rand::Rng;

// Report configuration
const INITIAL_CAPACITY: usize = 11;
const MAX_KEYS: usize = 20_000;
const SAMPLES: usize = 20;

const VARIANTS: [&str; 4] = [
    "Quadratic Probing / hash_function_1",
    "Quadratic Probing / hash_function_2",
    "Chaining / hash_function_1",
    "Chaining / hash_function_2",
];

const FONT_FAMILY: &str = "sans-serif";
const TITLE_SIZE: f64 = 35.0;
const TEXT_SIZE: f64 = 16.0;
const LINE_WIDTH: u32 = 2;
const MARKER_SIZE: i32 = 4;
const COLORS: [RGBColor; 4] = [
    RGBColor(220, 50, 50),  // Bright red
    RGBColor(50, 90, 220),  // Bright blue
    RGBColor(50, 180, 50),  // Bright green
    RGBColor(180, 50, 180), // Bright magenta
];

/// Measurements taken after every batch of inserts
#[derive(Debug, Default, Clone)]
struct Series {
    load: Vec<f64>,
    empty_ratio: Vec<f64>,
    micros_per_put: Vec<f64>,
    longest_bucket: Vec<f64>,
}

/// What the report needs from a map variant
trait ReportedMap {
    fn insert(&mut self, key: &str, value: usize);
    fn load(&self) -> f64;
    fn empty_ratio(&self) -> f64;
    fn longest(&self) -> usize;
}

impl ReportedMap for OpenAddressingMap<usize> {
    fn insert(&mut self, key: &str, value: usize) {
        self.put(key, value);
    }

    fn load(&self) -> f64 {
        self.table_load()
    }

    fn empty_ratio(&self) -> f64 {
        self.empty_buckets() as f64 / self.capacity() as f64
    }

    fn longest(&self) -> usize {
        self.longest_bucket()
    }
}

impl ReportedMap for ChainingMap<usize> {
    fn insert(&mut self, key: &str, value: usize) {
        self.put(key, value);
        // chaining never grows on its own, keep its load near 1 so the curves are comparable
        let resized =
            if self.table_load() > 1.0 { self.resize_table(self.capacity() * 2) } else { Ok(()) };
        if let Err(err) = resized {
            eprintln!("resize failed: {err}");
        }
    }

    fn load(&self) -> f64 {
        self.table_load()
    }

    fn empty_ratio(&self) -> f64 {
        self.empty_buckets() as f64 / self.capacity() as f64
    }

    fn longest(&self) -> usize {
        self.longest_bucket()
    }
}

fn measure(map: &mut impl ReportedMap, keys: &[String]) -> Series {
    let batch = (keys.len() / SAMPLES).max(1);
    let mut series = Series::default();

    for (batch_index, chunk) in keys.chunks(batch).enumerate() {
        let started = Instant::now();
        for (offset, key) in chunk.iter().enumerate() {
            map.insert(key, batch_index * batch + offset);
        }
        let elapsed = started.elapsed();

        series.load.push(map.load());
        series.empty_ratio.push(map.empty_ratio());
        series.micros_per_put.push(elapsed.as_secs_f64() * 1e6 / chunk.len() as f64);
        series.longest_bucket.push(map.longest() as f64);
    }

    series
}

fn column<F>(results: &[Series], field: F) -> Vec<Vec<f64>>
where
    F: Fn(&Series) -> &[f64],
{
    results.iter().map(|series| field(series).to_vec()).collect()
}

fn plot(
    file: &str,
    caption: &str,
    y_desc: &str,
    key_counts: &[usize],
    series: &[Vec<f64>],
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(file, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series.iter().flatten().fold(0.0_f64, |max, &y| max.max(y)) * 1.1; // Add 10% margin
    let last_point = key_counts.len().saturating_sub(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..last_point, 0.0..max_y.max(f64::EPSILON))?;

    chart
        .configure_mesh()
        .x_labels(key_counts.len())
        .x_label_formatter(&|x| key_counts.get(*x).map(ToString::to_string).unwrap_or_default())
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((FONT_FAMILY, TEXT_SIZE))
        .draw()?;

    for (index, (&name, values)) in VARIANTS.iter().zip(series).enumerate() {
        let color = COLORS[index % COLORS.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(LINE_WIDTH);

        chart
            .draw_series(LineSeries::new(values.iter().copied().enumerate(), line_style))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            values.iter().copied().enumerate().map(|point| Circle::new(point, MARKER_SIZE, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = rand::rng();
    let keys: Vec<String> =
        (0..MAX_KEYS).map(|_| format!("key{}", rng.random_range(0..1_000_000_000))).collect();

    let batch = (MAX_KEYS / SAMPLES).max(1);
    let key_counts: Vec<usize> = (1..=MAX_KEYS.div_ceil(batch)).map(|i| (i * batch).min(MAX_KEYS)).collect();
    println!("Sampling after {key_counts:?} keys");

    let hashes: [HashFn; 2] = [hash_function_1, hash_function_2];
    let mut results = Vec::with_capacity(VARIANTS.len());

    for &hash in &hashes {
        let mut map: OpenAddressingMap<usize> = OpenAddressingMap::new(INITIAL_CAPACITY, hash);
        results.push(measure(&mut map, &keys));
        println!("  probing: size = {}, capacity = {}, load = {:.3}", map.size(), map.capacity(), map.load());
    }
    for &hash in &hashes {
        let mut map: ChainingMap<usize> = ChainingMap::new(INITIAL_CAPACITY, hash);
        results.push(measure(&mut map, &keys));
        println!(
            "  chaining: size = {}, capacity = {}, load = {:.3}, longest chain = {}",
            map.size(),
            map.capacity(),
            map.load(),
            map.longest()
        );
    }

    for (name, series) in VARIANTS.iter().zip(&results) {
        let average = series.micros_per_put.iter().sum::<f64>() / series.micros_per_put.len().max(1) as f64;
        println!("{name}: {average:.3} µs per put on average");
    }

    plot(
        "table_load.png",
        "Table Load While Inserting",
        "size / capacity",
        &key_counts,
        &column(&results, |s| s.load.as_slice()),
    )?;
    plot(
        "empty_buckets.png",
        "Share of Empty Buckets",
        "empty buckets / capacity",
        &key_counts,
        &column(&results, |s| s.empty_ratio.as_slice()),
    )?;
    plot(
        "insert_time.png",
        "Average Insert Time per Batch",
        "microseconds per put",
        &key_counts,
        &column(&results, |s| s.micros_per_put.as_slice()),
    )?;
    plot(
        "longest_bucket.png",
        "Longest Collision Run",
        "longest chain or probe sequence",
        &key_counts,
        &column(&results, |s| s.longest_bucket.as_slice()),
    )?;

    println!(
        "Generated plot images: table_load.png, empty_buckets.png, insert_time.png, longest_bucket.png"
    );
    Ok(())
}
