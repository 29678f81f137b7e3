mod app;
pub use app::App;

fn main() -> anyhow::Result<()> {
    let app = App::from_args(std::env::args().skip(1))?;
    app.run()?;

    Ok(())
}
