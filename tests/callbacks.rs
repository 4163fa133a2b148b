use std::path::PathBuf;
use std::sync::Arc;

use wc_winners::callbacks::{
    CHOROPLETH_FIGURE, COUNTRY_DROPDOWN, COUNTRY_STATS, CallbackRegistry, InitialValues,
    InputValue, Output, WINNERS_LIST, WINNERS_LIST_ID, YEAR_DROPDOWN, YEAR_STATS, WidgetKey,
    choropleth_figure, country_stats, winners_list, year_stats,
};
use wc_winners::country_codes::CountryCode;
use wc_winners::error::DashboardError;
use wc_winners::figure::{ColorScale, GeoOptions, MAP_TITLE, Rgb};
use wc_winners::fragment::Fragment;
use wc_winners::snapshot::DashboardSnapshot;

fn snapshot(name: &str) -> Arc<DashboardSnapshot> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    DashboardSnapshot::load(&path).expect("fixture should load")
}

fn children(output: &Output) -> &Fragment {
    match output {
        Output::Children(fragment) => fragment,
        Output::Figure(_) => panic!("expected children output"),
    }
}

#[test]
fn country_stats_for_brazil() {
    let snap = snapshot("world_cup.csv");
    let stats = country_stats(&snap, "Brazil");
    assert_eq!(stats.wins, 5);
    assert_eq!(stats.years, vec![1958, 1962, 1970, 1994, 2002]);
    assert_eq!(stats.years.len(), stats.wins);

    let lines = stats.to_fragment().lines();
    assert_eq!(lines[0], "Statistics for Brazil");
    assert!(lines.contains(&"Number of World Cup wins: 5".to_string()));
    assert!(lines.contains(&"• 1958".to_string()));
}

#[test]
fn country_stats_for_non_winner_is_empty() {
    let snap = snapshot("world_cup.csv");
    let stats = country_stats(&snap, "Netherlands");
    assert_eq!(stats.wins, 0);
    assert!(stats.years.is_empty());
}

#[test]
fn year_stats_for_2022() {
    let snap = snapshot("world_cup.csv");
    let stats = year_stats(&snap, 2022).expect("2022 is in the dataset");
    assert_eq!(stats.winner, "Argentina");
    assert_eq!(stats.runner_up, "France");
    assert!(!stats.score.is_empty());
    assert_eq!(
        stats.to_fragment().lines(),
        vec![
            "World Cup 2022".to_string(),
            "Winner: Argentina".to_string(),
            "Runner-up: France".to_string(),
            "Score: 3-3 (4-2 pens)".to_string(),
        ]
    );
}

#[test]
fn year_stats_for_missing_year_is_lookup_miss() {
    let snap = snapshot("world_cup.csv");
    let err = year_stats(&snap, 1942).unwrap_err();
    assert!(matches!(err, DashboardError::LookupMiss { year: 1942 }));
}

#[test]
fn winners_list_keeps_aggregate_order() {
    let snap = snapshot("world_cup.csv");
    let list = winners_list(&snap);
    let expected: Vec<String> = snap
        .aggregate
        .entries()
        .iter()
        .map(|e| format!("{} ({} wins)", e.country, e.wins))
        .collect();
    assert_eq!(list, expected);
    assert_eq!(list[0], "Brazil (5 wins)");
    assert_eq!(list.last().map(String::as_str), Some("Spain (1 wins)"));
}

#[test]
fn map_ignores_selected_country() {
    let snap = snapshot("world_cup.csv");
    let brazil = choropleth_figure(&snap, "Brazil");
    let spain = choropleth_figure(&snap, "Spain");
    assert_eq!(brazil, spain);

    assert_eq!(brazil.title, MAP_TITLE);
    assert_eq!(brazil.location_mode, "country names");
    assert_eq!(brazil.color_scale, ColorScale::Viridis);
    assert!(brazil.geo.show_countries);
    assert!(brazil.geo.show_coastlines);
    assert_eq!(brazil.locations.len(), snap.aggregate.len());
    assert_eq!((brazil.cmin, brazil.cmax), (1, 5));

    let top = &brazil.locations[0];
    assert_eq!(top.country, "Brazil");
    assert_eq!(top.iso_code, CountryCode::Known("BRA"));
    assert_eq!(top.color, Rgb(0xfd, 0xe7, 0x25));
    let bottom = brazil.locations.last().expect("non-empty");
    assert_eq!(bottom.color, Rgb(0x44, 0x01, 0x54));
}

#[test]
fn figure_serializes_codes_and_colors_as_strings() {
    let snap = snapshot("unmapped_winner.csv");
    let figure = choropleth_figure(&snap, "Brazil");
    let json = serde_json::to_value(&figure).expect("figure should serialize");
    assert_eq!(json["location_mode"], "country names");
    assert_eq!(json["color_scale"], "Viridis");
    assert_eq!(json["locations"][0]["country"], "Brazil");
    assert_eq!(json["locations"][0]["iso_code"], "BRA");
    assert_eq!(json["locations"][1]["iso_code"], "unknown");
    assert_eq!(json["locations"][0]["color"], "#fde725");
}

#[test]
fn viridis_sample_clamps_and_interpolates() {
    let scale = ColorScale::Viridis;
    assert_eq!(scale.sample(-1.0), Rgb(0x44, 0x01, 0x54));
    assert_eq!(scale.sample(2.0), Rgb(0xfd, 0xe7, 0x25));
    assert_eq!(scale.sample(f64::NAN), Rgb(0x44, 0x01, 0x54));
    assert_eq!(Rgb(0x26, 0x82, 0x8e).to_string(), "#26828e");
}

#[test]
fn standard_registry_binds_four_callbacks() {
    let registry = CallbackRegistry::standard().expect("standard registry");
    let pairs: Vec<(String, String)> = registry
        .callbacks()
        .iter()
        .map(|cb| (cb.input.to_string(), cb.output.to_string()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("country-dropdown.value".to_string(), "choropleth-map.figure".to_string()),
            ("country-dropdown.value".to_string(), "country-stats.children".to_string()),
            ("year-dropdown.value".to_string(), "year-stats.children".to_string()),
            ("winners-list.id".to_string(), "winners-list.children".to_string()),
        ]
    );
    assert_eq!(
        registry.inputs(),
        vec![COUNTRY_DROPDOWN, YEAR_DROPDOWN, WINNERS_LIST_ID]
    );
}

#[test]
fn country_change_updates_map_and_stats() {
    let snap = snapshot("world_cup.csv");
    let registry = CallbackRegistry::standard().expect("standard registry");
    let updates = registry.dispatch(&snap, COUNTRY_DROPDOWN, &InputValue::Text("Italy".to_string()));
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].output, CHOROPLETH_FIGURE);
    assert!(matches!(updates[0].value, Output::Figure(_)));
    assert_eq!(updates[1].output, COUNTRY_STATS);
    let lines = children(&updates[1].value).lines();
    assert!(lines.contains(&"Number of World Cup wins: 4".to_string()));
}

#[test]
fn missing_year_becomes_a_notice() {
    let snap = snapshot("world_cup.csv");
    let registry = CallbackRegistry::standard().expect("standard registry");
    let updates = registry.dispatch(&snap, YEAR_DROPDOWN, &InputValue::Integer(1942));
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].output, YEAR_STATS);
    assert_eq!(
        children(&updates[0].value),
        &Fragment::notice("No data for World Cup 1942")
    );
}

#[test]
fn wrong_input_type_becomes_a_notice() {
    let snap = snapshot("world_cup.csv");
    let registry = CallbackRegistry::standard().expect("standard registry");
    let updates = registry.dispatch(&snap, YEAR_DROPDOWN, &InputValue::Text("2022".to_string()));
    let fragment = children(&updates[0].value);
    assert!(fragment.is_notice());
    assert!(fragment.lines()[0].contains("year-dropdown.value"));
}

#[test]
fn unbound_input_dispatches_nothing() {
    let snap = snapshot("world_cup.csv");
    let registry = CallbackRegistry::standard().expect("standard registry");
    let updates = registry.dispatch(&snap, WidgetKey::new("nope", "value"), &InputValue::Trigger);
    assert!(updates.is_empty());
}

fn noop(_: &DashboardSnapshot, _: &InputValue) -> Result<Output, DashboardError> {
    Ok(Output::Children(Fragment::div(Vec::new())))
}

#[test]
fn duplicate_output_is_rejected() {
    let mut registry = CallbackRegistry::standard().expect("standard registry");
    let err = registry.register(YEAR_DROPDOWN, WINNERS_LIST, noop).unwrap_err();
    assert!(matches!(err, DashboardError::DuplicateOutput { .. }));
    assert_eq!(registry.callbacks().len(), 4);
}

#[test]
fn initial_updates_fill_every_output() {
    let snap = snapshot("world_cup.csv");
    let registry = CallbackRegistry::standard().expect("standard registry");
    let initial = InitialValues {
        country: "Brazil".to_string(),
        year: 2022,
    };
    let updates = registry.initial_updates(&snap, &initial);
    let outputs: Vec<WidgetKey> = updates.iter().map(|u| u.output).collect();
    assert_eq!(
        outputs,
        vec![CHOROPLETH_FIGURE, COUNTRY_STATS, YEAR_STATS, WINNERS_LIST]
    );
    assert!(children(&updates[2].value).lines().contains(&"Winner: Argentina".to_string()));
}

#[test]
fn country_years_follow_table_order() {
    let snap = snapshot("out_of_order.csv");
    let stats = country_stats(&snap, "Brazil");
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.years, vec![2002, 1958]);
}

#[test]
fn duplicated_year_returns_first_record() {
    let snap = snapshot("duplicate_year.csv");
    let stats = year_stats(&snap, 1986).expect("1986 is in the dataset");
    assert_eq!(stats.winner, "Argentina");
    assert_eq!(stats.runner_up, "Germany");
    assert_eq!(snap.year_options, vec![1986]);
}

#[test]
fn terminal_outline_follows_coastline_flag_only() {
    let borders_only = GeoOptions {
        show_countries: true,
        show_coastlines: false,
    };
    assert!(!borders_only.draws_coastline_outline());

    let snap = snapshot("world_cup.csv");
    assert!(choropleth_figure(&snap, "Brazil").geo.draws_coastline_outline());
}
