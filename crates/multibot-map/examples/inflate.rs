use multibot_geometry::{Coordinates, Index};
use multibot_map::{BinaryOccupancyMap, MapProperty};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .init();

    // Create a 20x20 map with 0.1m resolution, cell [0][0] at (-1.0, -1.0) in world coordinates
    let property = MapProperty::new(Coordinates::new(-1.0, -1.0), 20, 20, 0.1);
    let mut map = BinaryOccupancyMap::from_property(property).unwrap();

    // Block in the center
    for x in 8..12 {
        for y in 8..12 {
            map.set_occupied(Index::new(x, y), true).unwrap();
        }
    }
    // A lone post near the border
    map.set_occupied(Index::new(2, 17), true).unwrap();

    // Inflate obstacles with a 0.2m radius
    map.inflate(0.2).unwrap();

    println!("Map after inflation (#=Obstacle, +=Inflated, .=Free):");
    println!("{}", map);

    // Distance from a few cells to the obstacle that inflated them
    for idx in [Index::new(7, 8), Index::new(6, 6), Index::new(2, 15)] {
        match map.inflation_engine().distance_to_source(idx) {
            Some(distance) => println!("Cell {} is {:.3}m from its obstacle", idx, distance),
            None => println!("Cell {} was not reached", idx),
        }
    }

    // World coordinate lookup
    let world_pos = Coordinates::new(0.0, 0.0);
    match map.cell_at_world(world_pos) {
        Ok(Some(cell)) => println!("\nWorld position {} maps to cell {}", world_pos, cell.idx),
        Ok(None) => println!("\nWorld position {} is outside map bounds.", world_pos),
        Err(e) => println!("\nError converting {}: {}", world_pos, e),
    }
}
