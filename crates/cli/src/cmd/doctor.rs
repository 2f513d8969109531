use planbook_core::compose::PageComposer;
use planbook_core::config::{ConfigLoader, default_config_path};
use std::path::Path;

pub fn run(config: Option<&Path>, locale: Option<&str>) {
    let rc = match ConfigLoader::load(config, locale) {
        Ok(rc) => rc,
        Err(e) => fail(&e.to_string(), config),
    };
    crate::logging::init(&rc);

    // Templates are checked against the page grid again by the composer.
    if let Err(e) = PageComposer::new(&rc) {
        fail(&e.to_string(), config);
    }

    println!("OK   planbook doctor");
    println!(
        "path: {}",
        rc.source.as_ref().map_or_else(
            || format!("{} (not found, using defaults)", default_config_path().display()),
            |p| p.display().to_string()
        )
    );
    println!("locale: {}", rc.language);
    println!("page: {:?}, {} columns", rc.page.size, rc.page.columns);
    println!("hours: {} labels", rc.hours.len());
    println!("q1_start_month: {}", rc.calendar.q1_start_month);
    if let Some(sprints) = rc.calendar.sprints {
        println!("sprints: every {} days from {}", sprints.length_days, sprints.epoch);
    }
    for file in &rc.template_files {
        println!("template: {}", file.display());
    }
    println!("roster_order: {:?}", rc.roster_order);
    println!("output_dir: {}", rc.output_dir.display());
}

fn fail(message: &str, config: Option<&Path>) -> ! {
    println!("FAIL planbook doctor");
    println!("{message}");
    if config.is_none() {
        println!("looked for: {}", default_config_path().display());
    }
    std::process::exit(1);
}
