use tidyhook::cli;
use tidyhook::errors::HookError;
use tidyhook::observability::{init_logging, install_panic_hook};

fn main() {
    install_panic_hook();
    init_logging();

    let code = match cli::run(cli::parse_args()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tidyhook: {e:#}");
            e.downcast_ref::<HookError>()
                .map(HookError::exit_code)
                .unwrap_or(1)
        }
    };

    std::process::exit(code);
}
