use phong_ngin::{Config, logging::init_logging};

fn main() {
    init_logging();

    let result = Config::from_env().and_then(phong_ngin::run);
    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
