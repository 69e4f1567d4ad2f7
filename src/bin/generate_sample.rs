use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Deterministic SplitMix64 generator; keeps sample output stable between runs.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const VENUES: [&str; 12] = [
    "Assembly Hall, Mound Place",
    "Pleasance Courtyard, 60 Pleasance",
    "Gilded Balloon Teviot, 13 Bristo Square",
    "Summerhall, 1 Summerhall",
    "Underbelly Cowgate, 66 Cowgate",
    "Traverse Theatre, 10 Cambridge Street",
    "Monkey Barrel Comedy, 9 Blair Street",
    "theSpace on the Mile, 80 High Street",
    "Greenside, Nicolson Square",
    "Zoo Southside, 117 Nicolson Street",
    "Bedlam Theatre, 11b Bristo Place",
    "Dance Base, 14-16 Grassmarket",
];

/// Mix of numeric grades and free text, as in real submissions.
const LEVELS: [&str; 10] = [
    "1",
    "2",
    "3",
    "Low",
    "Partial access",
    "Medium",
    "Poor",
    "Fully accessible",
    "Level access throughout",
    "",
];

const DETAILS: [&str; 5] = [
    "Step-free access to the main auditorium; accessible toilet on the ground floor.",
    "Entrance via a steep cobbled lane with three steps at the door. Staff can assist with a portable ramp on request, but the upper studio is only reachable by a spiral staircase.",
    "Lift to all floors, hearing loop installed, wheelchair spaces bookable in advance.",
    "Limited access.",
    "",
];

fn main() {
    let mut rng = SampleRng(42);

    let mut venue = Vec::new();
    let mut level = Vec::new();
    let mut year = Vec::new();
    let mut lat = Vec::new();
    let mut lon = Vec::new();
    let mut performances = Vec::new();
    let mut detail = Vec::new();

    for (i, name) in VENUES.iter().enumerate() {
        // Scatter around Edinburgh's Old Town.
        let base_lat = 55.9533 + (rng.next_f64() - 0.5) * 0.02;
        let base_lon = -3.1883 + (rng.next_f64() - 0.5) * 0.04;

        for y in 2022..=2024 {
            venue.push(name.to_string());
            let lvl = *rng.pick(&LEVELS);
            level.push((!lvl.is_empty()).then(|| lvl.to_string()));
            year.push(Some(y as i64));
            // Every fifth venue is missing coordinates one year, to exercise cleaning.
            let drop_coords = i % 5 == 0 && y == 2023;
            lat.push((!drop_coords).then_some(base_lat));
            lon.push((!drop_coords).then_some(base_lon));
            performances.push(Some((rng.next_u64() % 400) as f64));
            let d = *rng.pick(&DETAILS);
            detail.push((!d.is_empty()).then(|| d.to_string()));
        }
    }

    let rows = venue.len();
    let schema = Arc::new(Schema::new(vec![
        Field::new("Venue address", DataType::Utf8, false),
        Field::new("Accessibility level", DataType::Utf8, true),
        Field::new("Year", DataType::Int64, true),
        Field::new("Latitude", DataType::Float64, true),
        Field::new("Longitude", DataType::Float64, true),
        Field::new("Performances #", DataType::Float64, true),
        Field::new("Venue accessibility", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(venue)),
        Arc::new(StringArray::from(level)),
        Arc::new(Int64Array::from(year)),
        Arc::new(Float64Array::from(lat)),
        Arc::new(Float64Array::from(lon)),
        Arc::new(Float64Array::from(performances)),
        Arc::new(StringArray::from(detail)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "sample_venues.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {rows} venue rows ({} venues, 2022-2024) to {output_path}", VENUES.len());
}
