use crate::infra::{database_config, open_catalog};
use campus_admin::catalog::{Catalog, CatalogError, ClassDto, ClassInput, SectorDto, SectorInput};
use campus_admin::config::{AppConfig, DatabaseConfig};
use campus_admin::error::AppError;
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// SQLite file to run against. Defaults to a throwaway in-memory store.
    #[arg(long)]
    pub(crate) database: Option<String>,
}

/// What the scenario left behind, for callers that want more than the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DemoSummary {
    pub(crate) sectors: usize,
    pub(crate) classes: u64,
    pub(crate) rejected_writes: usize,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    config.database = database_config(
        &config,
        Some(
            args.database
                .unwrap_or_else(|| DatabaseConfig::IN_MEMORY.to_string()),
        ),
    );

    println!("Campus admin demo");
    println!(
        "- store: {} | locale: {}",
        config.database.path,
        config.locale.tag()
    );

    let catalog = open_catalog(&config)?;
    let summary = run_scenario(&catalog)?;

    println!(
        "\nDone: {} sector(s), {} class(es), {} write(s) rejected",
        summary.sectors, summary.classes, summary.rejected_writes
    );
    Ok(())
}

pub(crate) fn run_scenario(catalog: &Catalog) -> Result<DemoSummary, AppError> {
    let mut rejected_writes = 0;

    println!("\nSectors");
    let informatique = ensure_sector(catalog, "Informatique")?;
    let gestion = ensure_sector(catalog, "Gestion")?;
    for sector in catalog.sectors.list_all()? {
        println!("  - #{} {}", sector.id, sector.name);
    }

    println!("\nClasses");
    let l1 = catalog
        .classes
        .create(&ClassInput::new("L1", "First year", informatique.id.0))?;
    print_class("created", &l1);

    match catalog
        .classes
        .create(&ClassInput::new("L2", "Second year", 999))
    {
        Ok(class) => print_class("created", &class),
        Err(err) => {
            rejected_writes += 1;
            println!("  rejected L2: {err}");
        }
    }

    match catalog.classes.create(&ClassInput::new("", "", informatique.id.0)) {
        Ok(class) => print_class("created", &class),
        Err(CatalogError::Validation(errors)) => {
            rejected_writes += 1;
            for field in &errors.fields {
                println!("  rejected blank class: {} ({})", field.message, field.field);
            }
        }
        Err(err) => return Err(err.into()),
    }

    let moved = catalog
        .classes
        .update(l1.id, &ClassInput::new("L1", "First year", gestion.id.0))?;
    print_class("moved", &moved);

    println!(
        "  {} has {} class(es), {} has {}",
        informatique.name,
        catalog.classes.list_by_sector(informatique.id)?.len(),
        gestion.name,
        catalog.classes.list_by_sector(gestion.id)?.len()
    );

    println!("\nCleanup");
    catalog.sectors.delete(gestion.id)?;
    println!("  deleted sector {} and its classes", gestion.name);
    match catalog.classes.get_by_id(l1.id) {
        Ok(class) => print_class("still present", &class),
        Err(err) => println!("  lookup of class #{}: {err}", l1.id),
    }

    Ok(DemoSummary {
        sectors: catalog.sectors.list_all()?.len(),
        classes: catalog.classes.count()?,
        rejected_writes,
    })
}

/// Reuses a sector left over from an earlier run against the same file.
fn ensure_sector(catalog: &Catalog, name: &str) -> Result<SectorDto, AppError> {
    match catalog.sectors.create(&SectorInput::named(name)) {
        Ok(sector) => {
            println!("  created #{} {}", sector.id, sector.name);
            Ok(sector)
        }
        Err(CatalogError::Conflict { .. }) => Ok(catalog.sectors.get_by_name(name)?),
        Err(err) => Err(err.into()),
    }
}

fn print_class(action: &str, class: &ClassDto) {
    println!(
        "  {action} #{} {} ({}) in {}",
        class.id, class.class_name, class.description, class.sector_name
    );
}
