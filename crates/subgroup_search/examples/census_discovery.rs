use std::time::Instant;

use polars::prelude::*;
use subgroup_search::apriori::Apriori;
use subgroup_search::dfs::Bsd;
use subgroup_search::quality::{QualityMeasure, StandardQF};
use subgroup_search::selectors::Selector;
use subgroup_search::target::Target;
use subgroup_search::task::{SubgroupDiscoveryTask, SubgroupSearchAlgorithm};

fn generate_sample_dataframe(n_samples: usize) -> DataFrame {
    let mut ages: Vec<Option<f64>> = Vec::with_capacity(n_samples);
    let mut sexes: Vec<Option<&str>> = Vec::with_capacity(n_samples);
    let mut regions: Vec<Option<&str>> = Vec::with_capacity(n_samples);
    let mut high_income: Vec<Option<bool>> = Vec::with_capacity(n_samples);

    for i in 0..n_samples {
        let age = 20.0 + ((i * 13) % 50) as f64;
        let sex = if i % 3 == 0 { "f" } else { "m" };
        let region = match i % 4 {
            0 => "north",
            1 => "south",
            2 => "east",
            _ => "west",
        };
        // Income skews with age and region
        let income = age > 45.0 || (region == "north" && i % 2 == 0);
        ages.push(Some(age));
        sexes.push(Some(sex));
        regions.push(Some(region));
        high_income.push(Some(income));
    }

    DataFrame::new_infer_height(vec![
        Series::new(PlSmallStr::from_static("age"), ages).into(),
        Series::new(PlSmallStr::from_static("sex"), sexes).into(),
        Series::new(PlSmallStr::from_static("region"), regions).into(),
        Series::new(PlSmallStr::from_static("high_income"), high_income).into(),
    ])
    .unwrap()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let df = generate_sample_dataframe(400);
    println!("dataset: {} rows", df.height());

    let search_space = vec![
        Selector::equals("sex", "f"),
        Selector::equals("sex", "m"),
        Selector::equals("region", "north"),
        Selector::equals("region", "south"),
        Selector::equals("region", "east"),
        Selector::equals("region", "west"),
        Selector::less_than("age", 45.0),
        Selector::at_least("age", 45.0),
    ];

    let task = SubgroupDiscoveryTask::new(
        df,
        Target::Binary(Selector::equals("high_income", true)),
        search_space,
        QualityMeasure::bounded(StandardQF::weighted_relative_accuracy()),
        5,
        3,
    )?;

    let start = Instant::now();
    let apriori_results = Apriori.execute(&task)?;
    println!("\napriori ({:?}):", start.elapsed());
    for scored in &apriori_results {
        println!("  {}", scored);
    }

    let start = Instant::now();
    let bsd_results = Bsd.execute(&task)?;
    println!("\nbsd ({:?}):", start.elapsed());
    for scored in &bsd_results {
        println!("  {}", scored);
    }

    Ok(())
}
