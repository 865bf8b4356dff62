use facetfilter::config::FilterSettings;
use facetfilter::controller::{ClickTarget, FilterController, Surface};
use facetfilter::matcher::EvalPath;
use facetfilter::model::ItemId;
use facetfilter::port::memory::MemListing;
use facetfilter::port::Badge;

const PAGE: &str = include_str!("fixtures/stroje.json");

fn setup() -> FilterController<MemListing> {
    let listing = MemListing::from_json(PAGE).unwrap();
    FilterController::new(listing, FilterSettings::default())
}

#[test]
fn test_shared_link_prefilters_listing() {
    let mut c = setup();
    c.bootstrap();

    assert!(c.port().is_checked("kat-kombajny"));
    assert_eq!(c.port().badge(), Some(Badge::Count(1)));
    assert_eq!(c.port().visible_ids(), vec!["lexion-760", "tucano-450"]);
    assert_eq!(c.surface(), Surface::Closed);
}

#[test]
fn test_user_session() {
    let mut c = setup();
    c.bootstrap();

    // open the panel, refine to Claas combines from 2015-2019
    c.toggle();
    assert_eq!(c.surface(), Surface::Open);
    c.port().click_input("vyr-claas");
    c.on_input_change();
    c.port().click_input("rok-2015");
    c.on_input_change();
    assert_eq!(c.port().badge(), Some(Badge::Count(3)));
    // not applied yet
    assert_eq!(c.port().visible_ids().len(), 2);

    c.apply();
    assert_eq!(c.port().visible_ids(), vec!["lexion-760"]);
    assert_eq!(c.surface(), Surface::Closed);

    // clicking around the page while closed does nothing
    c.on_document_click(ClickTarget::Outside);
    assert_eq!(c.surface(), Surface::Closed);

    c.toggle();
    c.clear_all();
    assert_eq!(c.port().badge(), Some(Badge::Hidden));
    assert_eq!(c.port().visible_ids().len(), 4);
    assert_eq!(c.visibility().unwrap().path, EvalPath::ShowAll);

    c.on_document_click(ClickTarget::Outside);
    assert_eq!(c.surface(), Surface::Closed);
}

#[test]
fn test_every_categorical_facet_filters() {
    let cases = [
        ("kat-traktory", vec!["fendt-724", "zetor-proxima"]),
        ("vyr-fendt", vec!["fendt-724"]),
        ("typ-samojizdny", vec!["lexion-760", "tucano-450"]),
        ("model-lexion", vec!["lexion-760"]),
        ("sys-4x4", vec!["fendt-724", "lexion-760"]),
    ];

    for (input, expected) in cases {
        let listing = MemListing::from_json(PAGE).unwrap();
        listing.click_input(input);
        let mut c = FilterController::new(listing, FilterSettings::default());
        c.apply();
        assert_eq!(c.port().visible_ids(), expected, "input {}", input);
    }
}

#[test]
fn test_year_buckets_and_unparseable_years() {
    let mut c = setup();
    c.port().click_input("rok-2020");
    c.port().click_input("rok-2010");
    c.apply();

    assert_eq!(c.port().visible_ids(), vec!["fendt-724", "tucano-450"]);
    // "unknown" is not a year
    assert!(c.port().is_hidden("zetor-proxima"));
    let vis = c.visibility().unwrap();
    assert!(vis.hidden.contains(&ItemId::new("lexion-760")));
}

#[test]
fn test_input_without_facet_is_ignored() {
    let mut c = setup();
    c.port().click_input("newsletter");
    c.on_input_change();
    assert_eq!(c.port().badge(), Some(Badge::Hidden));

    c.apply();
    assert_eq!(c.visibility().unwrap().path, EvalPath::ShowAll);
}

#[test]
fn test_page_without_filter_panel() {
    let page = r#"{ "panel": false, "query": "?kategorie=tractors",
        "items": [{ "id": "a", "data": { "data-kategorie": "combines" } }] }"#;
    let listing = MemListing::from_json(page).unwrap();
    let mut c = FilterController::new(listing, FilterSettings::default());

    c.bootstrap();
    c.toggle();
    c.apply();

    assert_eq!(c.surface(), Surface::Closed);
    assert_eq!(c.port().visible_ids(), vec!["a"]);
    assert_eq!(c.port().marker_writes(), 0);
}
