//! Sitter search with related avatars.
//!
//! This example searches for sitters, asks the API to include their avatars,
//! and reads each avatar through a `SitterView`.
//!
//! Run with: `cargo run --example search_with_views`
//! (set `KIDSOUT_API_KEY` to send an API key)

use kidsout::{Client, SearchSittersParams, SitterView, Sort};

#[tokio::main]
async fn main() -> Result<(), kidsout::Error> {
    let mut builder = Client::builder().user_agent_suffix("search-demo/1.0");
    if let Ok(api_key) = std::env::var("KIDSOUT_API_KEY") {
        builder = builder.api_key(api_key);
    }
    let client = builder.build()?;

    let response = client
        .search_sitters(&SearchSittersParams {
            page: Some(1),
            per_page: Some(10),
            sort: Some(Sort::KidsoutScoreDesc),
            include: vec!["avatars".into()],
            ..Default::default()
        })
        .await?;

    println!(
        "Page {}/{} ({} sitters total)",
        response.meta.current_page, response.meta.total_pages, response.meta.total
    );

    // Every view shares the response's included pool
    let sitters = SitterView::from_list_response(response);

    for sitter in &sitters {
        let name = sitter
            .attributes()
            .first_name
            .as_deref()
            .or(sitter.attributes().name.as_deref())
            .unwrap_or("Unknown");

        match sitter.avatar().and_then(|a| a.attributes.best_url()) {
            Some(url) => println!("{:>8}  {:<20} {}", sitter.id(), name, url),
            None => println!("{:>8}  {:<20} (no avatar)", sitter.id(), name),
        }
    }

    Ok(())
}
