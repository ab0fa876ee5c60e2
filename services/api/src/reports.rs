use crate::cli::{AnalyzeArgs, DatasetArgs, FilterArgs, FilterFlags};
use crate::infra::filter_state_from_flags;
use rental_market::config::AppConfig;
use rental_market::error::AppError;
use rental_market::market::{
    apply_filters, available_cities, compute_facets, paginate, Facets, ListingImporter,
    MarketAnalyzer, MarketReport, PropertyRecord,
};
use rental_market::telemetry;
use std::path::Path;

const NO_DATA: &str = "No data available";

fn load_records(path: &Path) -> Result<Vec<PropertyRecord>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;
    Ok(ListingImporter::from_path(path)?)
}

pub(crate) fn run_facets_report(args: DatasetArgs) -> Result<(), AppError> {
    let records = load_records(&args.path)?;
    print!("{}", facets_output(&records));
    Ok(())
}

pub(crate) fn run_analysis_report(args: AnalyzeArgs) -> Result<(), AppError> {
    let records = load_records(&args.dataset.path)?;
    print!("{}", analysis_output(&records, &args.filters, args.json)?);
    Ok(())
}

pub(crate) fn run_filter_report(args: FilterArgs) -> Result<(), AppError> {
    let records = load_records(&args.dataset.path)?;
    print!(
        "{}",
        filter_output(&records, &args.filters, args.page, args.per_page)
    );
    Ok(())
}

fn facets_output(records: &[PropertyRecord]) -> String {
    if records.is_empty() {
        return format!("{NO_DATA}\n");
    }
    render_facets(&compute_facets(records), records)
}

fn analysis_output(
    records: &[PropertyRecord],
    flags: &FilterFlags,
    json: bool,
) -> Result<String, AppError> {
    let state = filter_state_from_flags(records, flags);
    let filtered = apply_filters(records, &state);
    if filtered.is_empty() {
        return Ok(format!("{NO_DATA}\n"));
    }

    let report = MarketAnalyzer::analyze(&filtered);
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
    } else {
        Ok(render_market_report(&report))
    }
}

fn filter_output(
    records: &[PropertyRecord],
    flags: &FilterFlags,
    page: usize,
    per_page: usize,
) -> String {
    if records.is_empty() {
        return format!("{NO_DATA}\n");
    }

    let state = filter_state_from_flags(records, flags);
    let filtered = apply_filters(records, &state);
    let page = paginate(&filtered, page, per_page);

    let mut out = format!(
        "Page {}/{} ({} matching of {} listings)\n",
        page.page,
        page.total_pages.max(1),
        page.total_items,
        records.len()
    );
    for record in &page.items {
        out.push_str(&format!("- {}\n", listing_line(record)));
    }
    out
}

fn listing_line(record: &PropertyRecord) -> String {
    let location = match (record.city_value(), record.state_value()) {
        (Some(city), Some(state)) => format!("{city}, {state}"),
        (None, Some(state)) => state.to_string(),
        _ => "location not listed".to_string(),
    };
    let beds = record
        .beds
        .map(|beds| format!("{beds} bed"))
        .unwrap_or_else(|| "beds n/a".to_string());

    format!(
        "{} | {} | {:.0}/month | {} | {} | {}",
        record.id,
        record.property_type,
        record.price,
        location,
        beds,
        record.furnishing_label()
    )
}

pub(crate) fn render_facets(facets: &Facets, records: &[PropertyRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Property types: {}\n", facets.types.join(", ")));
    out.push_str(&format!("States: {}\n", facets.states.join(", ")));
    for state in &facets.states {
        let cities = available_cities(records, std::slice::from_ref(state));
        out.push_str(&format!("  {state}: {}\n", cities.join(", ")));
    }
    out.push_str(&format!("Furnishing: {}\n", facets.furnishings.join(", ")));
    let beds: Vec<String> = facets.beds.iter().map(u32::to_string).collect();
    out.push_str(&format!("Bedrooms: {}\n", beds.join(", ")));
    if !facets.amenities.is_empty() {
        out.push_str(&format!("Amenities: {}\n", facets.amenities.join(", ")));
    }
    out
}

pub(crate) fn render_market_report(report: &MarketReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Rental market analysis ({} listings)\n",
        report.total_listings
    ));

    if let Some(overall) = &report.overall {
        out.push_str(&format!(
            "Overall: mean {:.0} | median {:.0} | {:.0}-{:.0} | IQR {:.0}-{:.0}\n",
            overall.mean, overall.median, overall.min, overall.max, overall.p25, overall.p75
        ));
    }

    out.push_str("\nBy property type\n");
    for entry in &report.type_analysis {
        out.push_str(&format!(
            "- {}: {} listings | mean {:.0} | median {:.0} | range {:.0} ({:.0}-{:.0}) | p25 {:.0} | p75 {:.0}\n",
            entry.property_type,
            entry.count,
            entry.mean,
            entry.median,
            entry.range,
            entry.min,
            entry.max,
            entry.p25,
            entry.p75
        ));
    }

    out.push_str("\nBy state\n");
    for entry in &report.state_analysis {
        out.push_str(&format!(
            "- {}: {} listings | mean {:.0} | median {:.0} | range {:.0}\n",
            entry.state, entry.count, entry.mean, entry.median, entry.range
        ));
        for city in report.cities_for(&entry.state).unwrap_or_default() {
            out.push_str(&format!(
                "    - {}: {} listings | mean {:.0} | median {:.0} | range {:.0}\n",
                city.city, city.count, city.mean, city.median, city.range
            ));
        }
    }

    out.push_str("\nBy bedrooms\n");
    for entry in &report.room_analysis {
        out.push_str(&format!(
            "- {} bed: {} listings | mean {:.0} | median {:.0}\n",
            entry.beds, entry.count, entry.mean, entry.median
        ));
    }

    out.push_str("\nBy furnishing\n");
    for entry in &report.furnishing_analysis {
        out.push_str(&format!(
            "- {}: {} listings | mean {:.0} | median {:.0}\n",
            entry.label, entry.count, entry.mean, entry.median
        ));
    }

    out
}
