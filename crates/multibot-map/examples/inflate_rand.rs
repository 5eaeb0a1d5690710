use multibot_geometry::{Coordinates, Index};
use multibot_map::{BinaryOccupancyMap, MapProperty};
use rand::Rng;

fn main() {
    let mut rng = rand::rng();

    // Create a 30x20 map with 0.1m resolution and 15 random obstacles of up to 2x2 cells
    let property = MapProperty::new(Coordinates::new(-1.5, -1.0), 30, 20, 0.1);
    let mut map = BinaryOccupancyMap::from_property(property).unwrap();
    for _ in 0..15 {
        let (x, y) = (rng.random_range(0..29), rng.random_range(0..19));
        let (w, h) = (rng.random_range(1..=2), rng.random_range(1..=2));
        for dx in 0..w {
            for dy in 0..h {
                map.set_occupied(Index::new(x + dx, y + dy), true).unwrap();
            }
        }
    }

    println!("Map after random generation:");
    println!("{}", map);

    for radius in [0.1, 0.25, -0.1] {
        match map.inflate(radius) {
            Ok(cells) => {
                let inflated = cells.iter().filter(|c| c.occupied).count();
                println!("\nObstacles inflated with {radius}m radius: {inflated} cells blocked.");
                println!("{}", map);
            }
            Err(e) => println!("\nError inflating obstacles: {}", e),
        }
    }
}
