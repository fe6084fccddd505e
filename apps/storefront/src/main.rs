//! Storefront entry point.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    storefront::run()?;
    Ok(())
}
