/// Prints the tree a source list renders to, with an optional search applied.
///
/// Usage: `slideview-outline [--config <config.json>] <sources.json> [query]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::rc::Rc;

    use slideview::sources::file_provider;
    use slideview::{AppConfig, MemoryStore, SourceChain, TreeController};
    use slideview_tree::MemorySurface;

    let mut args = std::env::args().skip(1).peekable();
    let config = if args.peek().map(String::as_str) == Some("--config") {
        args.next();
        match args.next() {
            Some(path) => AppConfig::load_from_path(&PathBuf::from(path)),
            None => usage(),
        }
    } else {
        AppConfig::default()
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let Some(sources) = args.next().map(PathBuf::from) else {
        usage();
    };
    let query = args.next().unwrap_or_default();

    let label = sources.display().to_string();
    let chain = SourceChain::new().with_provider(label, file_provider(sources));
    let mut controller = pollster::block_on(TreeController::load(
        chain,
        MemorySurface::new(),
        Rc::new(MemoryStore::new()),
        config.initial_source.storage_key.clone(),
    ));

    let total = controller.view().tree().leaves().count();
    let shown = controller.search(&query);
    print!("{}", controller.view().surface().outline());
    println!();
    if query.trim().is_empty() {
        println!("{} leaves", total);
    } else {
        println!("{} of {} leaves match '{}'", shown, total, query.trim());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn usage() -> ! {
    eprintln!("usage: slideview-outline [--config <config.json>] <sources.json> [query]");
    std::process::exit(2);
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
