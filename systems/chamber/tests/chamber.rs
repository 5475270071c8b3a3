use underdark_core::{Compass, Coord, Direction, SlugSeparator};
use underdark_system_chamber::ChamberOrigin;

#[test]
fn default_origin_addresses_room_levels_under_the_manor() {
    let origin = ChamberOrigin::default();
    let chamber = origin.chamber_id(5, 2);

    let expected = (1_u128 << 112) | (5_u128 << 96) | (2_u128 << 64) | (1_u128 << 48) | (1_u128 << 32);
    assert_eq!(chamber, Coord::new(expected));
}

#[test]
fn chamber_keeps_manor_position_and_renders_slug() {
    let manor = Compass::default().with_south(4).with_west(2).to_coord();
    let origin = ChamberOrigin::new(7, manor);
    let chamber = origin.chamber_id(12, 3).to_compass().expect("valid chamber");

    assert_eq!(chamber.realm_id(), 7);
    assert_eq!(chamber.room_id(), 12);
    assert_eq!(chamber.under(), 3);
    assert_eq!(chamber.to_slug(3, SlugSeparator::Comma), "#12,U3,S4,W2,Y3");
}

#[test]
fn next_level_is_one_step_under() {
    let origin = ChamberOrigin::default();
    assert_eq!(
        origin.chamber_id(9, 1).offset(Direction::Under),
        origin.chamber_id(9, 2)
    );
}

#[test]
fn origin_loads_from_toml() {
    let origin: ChamberOrigin = toml::from_str(
        r#"
            realm_id = 3
            manor = "0x1000100000000"
        "#,
    )
    .expect("valid origin");

    assert_eq!(origin.realm_id, 3);
    assert_eq!(
        origin.manor,
        Compass::default().with_north(1).with_east(1).to_coord()
    );
}
