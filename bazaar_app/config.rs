use dotenvy::dotenv;
use std::env;

pub struct Config {
    pub max_images_per_listing: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let max_images_per_listing = match env::var("BAZAAR_MAX_IMAGES_PER_LISTING") {
            Ok(val) => val.parse::<usize>().unwrap_or(10),
            Err(_) => 10,
        };

        Self {
            max_images_per_listing,
        }
    }
}
