use bus_planner::cache::{CacheConfig, CachedStopClient};
use bus_planner::directions::{DirectionsClient, DirectionsConfig};
use bus_planner::domain::PointKind;
use bus_planner::stops::{StopClient, StopClientConfig, fetch_route_stops};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Get credentials from environment
    let directions_key = std::env::var("DIRECTIONS_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: DIRECTIONS_API_KEY not set. API calls will fail.");
        String::new()
    });
    let transit_key = std::env::var("TRANSIT_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: TRANSIT_API_KEY not set. API calls will fail.");
        String::new()
    });

    let mut args = std::env::args().skip(1);
    let (Some(origin), Some(destination)) = (args.next(), args.next()) else {
        eprintln!("Usage: bus-planner <origin> <destination>");
        std::process::exit(2);
    };

    // Create clients
    let directions = DirectionsClient::new(DirectionsConfig::new(&directions_key))
        .expect("Failed to create directions client");
    let stop_client = StopClient::new(StopClientConfig::new(&transit_key))
        .expect("Failed to create stop client");
    let cached_stops = CachedStopClient::new(stop_client, &CacheConfig::default());

    // Fetch candidate routes
    println!("Fetching bus routes from {origin} to {destination}...");
    let routes = match directions.fetch_routes(&origin, &destination).await {
        Ok(routes) => routes,
        Err(e) => {
            eprintln!("Failed to fetch routes: {e}");
            std::process::exit(1);
        }
    };

    if routes.is_empty() {
        println!("No bus routes found.");
        return;
    }

    for (index, route) in routes.iter().enumerate() {
        println!();
        println!("Route {}:", index + 1);
        println!("{}", route.instructions());
    }

    // Resolve the ridden stops for the first candidate
    let route = &routes[0];
    println!();
    println!("Resolving stops for route 1...");
    let stops = fetch_route_stops(&cached_stops, route).await;

    let points = route.polyline(&stops);
    println!("{} path points:", points.len());
    for point in &points {
        match point.kind {
            PointKind::WalkAnchor => {
                println!("  walk  {:.5},{:.5}", point.position.lat, point.position.lng);
            }
            PointKind::BusStop => {
                println!(
                    "  stop  {:.5},{:.5}  {}",
                    point.position.lat, point.position.lng, point.name
                );
            }
        }
    }
}
