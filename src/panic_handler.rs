use log::error;
use std::io::{self, Write};
use std::panic;

/// Install panic reporting for the command-line tool.
///
/// Debug builds get `better_panic` backtraces; release builds get a
/// `human_panic` crash report. Either way the panic is also logged.
pub fn initialize_panic_handler() {
    #[cfg(debug_assertions)]
    better_panic::install();

    #[cfg(not(debug_assertions))]
    human_panic::setup_panic!();

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            error!("Panic: {}", msg);
        } else if let Some(msg) = panic_info.payload().downcast_ref::<String>() {
            error!("Panic: {}", msg);
        } else {
            error!("Panic with unknown payload");
        }

        // Keep partial output on stdout separated from the report.
        let _ = writeln!(io::stderr());
        default_hook(panic_info);
    }));
}
