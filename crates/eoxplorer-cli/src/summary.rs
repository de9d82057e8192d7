use std::path::Path;

use console::Style;
use eoxplorer_core::explorer::ExplorerConfig;
use eoxplorer_core::render::ProfileBands;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_explorer_summary(config: &ExplorerConfig, scenes: &Path) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("EOxplorer"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(9)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Scenes"), s.path.apply_to(scenes.display()));
    println!("  {:<14}{}", s.label.apply_to("Collection"), s.value.apply_to(&config.collection_id));
    println!("  {:<14}{}", s.label.apply_to("Range"), s.value.apply_to(config.date_range));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Clouds"),
        s.value.apply_to(format!("< {}%", config.cloud_threshold))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mask"),
        s.value.apply_to(format!(
            "{} bits {} / {}",
            config.mask.qa_band, config.mask.cloud_bit, config.mask.cirrus_bit
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Index"),
        s.method.apply_to(format!(
            "ND({}, {}) of {}",
            config.index.nir_band, config.index.red_band, config.index.composite
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Maps"));
    for layer in &config.layers {
        let (min, max) = layer.profile.range();
        let bands = match layer.profile.bands() {
            ProfileBands::Rgb(b) => b.join("/"),
            ProfileBands::Single(b) => b.clone(),
        };
        println!(
            "    {:<22}{:<18}{} [{}, {}]",
            s.value.apply_to(&layer.title),
            s.method.apply_to(layer.source),
            s.label.apply_to(bands),
            min,
            max
        );
    }
    println!();
}
