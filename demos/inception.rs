use film_locations::render::HtmlPanel;
use film_locations::FilmSearch;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let search = FilmSearch::default();
    let mut panel = HtmlPanel::new();
    let report = search.submit("Inception", &mut panel);
    for failure in &report.failures {
        eprintln!("{} failed: {}", failure.source, failure.error);
    }
    print!("{}", search.listing(&report));
    std::fs::write("inception.html", panel.page())?;
    Ok(())
}
