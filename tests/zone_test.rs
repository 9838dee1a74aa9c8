//! Integration tests for green zone placement, rename and aggregation.

use citynet::domain::{City, CityNetwork, DomainError, TreeView, Zone};
use citynet::util::testing;
use rstest::rstest;

fn network_with(city: &str) -> CityNetwork {
    testing::init_test_setup();
    let mut network = CityNetwork::new();
    network.add_city(City::new(city)).unwrap();
    network
}

fn leaf(name: &str) -> TreeView {
    TreeView {
        name: name.into(),
        children: vec![],
    }
}

#[rstest]
#[case(Zone::new("Park"), 1, 1)]
#[case(Zone::new("Park").with_subzone(Zone::new("Pond")), 2, 2)]
#[case(
    Zone::new("Park").with_subzone(Zone::new("Pond")).with_subzone(Zone::new("Meadow")),
    2,
    3
)]
#[case(
    Zone::new("Park")
        .with_subzone(Zone::new("Pond").with_subzone(Zone::new("Island")))
        .with_subzone(Zone::new("Meadow")),
    3,
    4
)]
fn given_zone_tree_when_aggregating_then_height_and_count_match(
    #[case] zone: Zone,
    #[case] height: usize,
    #[case] total: usize,
) {
    assert_eq!(zone.max_height(), height);
    assert_eq!(zone.total_zones(), total);
}

#[test]
fn given_park_and_pond_when_aggregating_city_then_two_zones_height_two() {
    let mut network = network_with("A");
    network.add_green_zone("A", "Park", None).unwrap();
    network.add_green_zone("A", "Pond", Some("Park")).unwrap();

    assert_eq!(network.total_green_zones("A").unwrap(), 2);
    assert_eq!(network.max_green_zone_height("A").unwrap(), 2);
}

#[test]
fn given_renamed_zone_when_adding_under_new_and_stale_name_then_only_new_name_works() {
    let mut network = network_with("A");
    network.add_green_zone("A", "Park", None).unwrap();
    network.rename_zone("A", "Park", "CentralPark").unwrap();

    network
        .add_green_zone("A", "Fountain", Some("CentralPark"))
        .unwrap();
    let err = network
        .add_green_zone("A", "Kiosk", Some("Park"))
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::ParentNotFound {
            city: "A".into(),
            parent: "Park".into(),
        }
    );
    assert_eq!(network.total_green_zones("A").unwrap(), 2);
}

#[test]
fn given_unknown_city_when_placing_or_renaming_then_city_not_found() {
    let mut network = network_with("A");
    assert_eq!(
        network.add_green_zone("Ghost", "Park", None).unwrap_err(),
        DomainError::CityNotFound("Ghost".into())
    );
    assert_eq!(
        network.rename_zone("Ghost", "Park", "Garden").unwrap_err(),
        DomainError::CityNotFound("Ghost".into())
    );
}

#[test]
fn given_unknown_zone_when_renaming_then_zone_not_found_and_forest_unchanged() {
    let mut network = network_with("A");
    network.add_green_zone("A", "Park", None).unwrap();
    let before = network.zone_tree_view("A").unwrap();

    let err = network.rename_zone("A", "Lake", "BigLake").unwrap_err();

    assert_eq!(
        err,
        DomainError::ZoneNotFound {
            city: "A".into(),
            zone: "Lake".into(),
        }
    );
    assert_eq!(network.zone_tree_view("A").unwrap(), before);
}

#[test]
fn given_duplicate_zone_names_when_placing_then_first_preorder_match_is_parent() {
    let mut network = network_with("A");
    network.add_green_zone("A", "North", None).unwrap();
    network.add_green_zone("A", "Pond", Some("North")).unwrap();
    network.add_green_zone("A", "South", None).unwrap();
    network.add_green_zone("A", "Pond", Some("South")).unwrap();

    network.add_green_zone("A", "Duck", Some("Pond")).unwrap();

    let view = network.zone_tree_view("A").unwrap();
    assert_eq!(
        view,
        TreeView {
            name: "A".into(),
            children: vec![
                TreeView {
                    name: "North".into(),
                    children: vec![TreeView {
                        name: "Pond".into(),
                        children: vec![leaf("Duck")],
                    }],
                },
                TreeView {
                    name: "South".into(),
                    children: vec![leaf("Pond")],
                },
            ],
        }
    );
}

#[test]
fn given_zone_with_children_when_renaming_then_position_and_subtree_preserved() {
    let mut network = network_with("A");
    for (zone, parent) in [
        ("Park", None),
        ("Pond", Some("Park")),
        ("Meadow", Some("Park")),
        ("Island", Some("Pond")),
    ] {
        network.add_green_zone("A", zone, parent).unwrap();
    }

    network.rename_zone("A", "Pond", "Lake").unwrap();

    let city = network.city("A").unwrap();
    let park = &city.green_zones[0];
    let names: Vec<_> = park.subzones.iter().map(|z| z.name.as_str()).collect();
    assert_eq!(names, vec!["Lake", "Meadow"]);
    assert_eq!(park.subzones[0].subzones[0].name, "Island");
}

#[test]
fn given_tree_view_when_serializing_then_leaves_have_empty_children() {
    let mut network = network_with("A");
    network.add_green_zone("A", "Park", None).unwrap();
    network.add_green_zone("A", "Pond", Some("Park")).unwrap();

    let json = serde_json::to_value(network.zone_tree_view("A").unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "A",
            "children": [{"name": "Park", "children": [{"name": "Pond", "children": []}]}]
        })
    );
}

#[test]
fn given_deep_chain_when_searching_then_no_stack_overflow() {
    let mut network = network_with("A");
    network.add_green_zone("A", "z0", None).unwrap();
    for i in 1..500 {
        let parent = format!("z{}", i - 1);
        network
            .add_green_zone("A", &format!("z{i}"), Some(&parent))
            .unwrap();
    }
    network.rename_zone("A", "z499", "bottom").unwrap();
    assert!(network.city("A").unwrap().find_zone("bottom").is_some());
}
