mod cli;

use std::process::ExitCode;

use log::{debug, error};
use png_phys::{read_png_phys_from_path, PhysicalPixelDimensions};

fn format_phys(path: &str, phys: &PhysicalPixelDimensions, show_dpi: bool) -> String {
    let mut line = format!("pHYs: {} {}", path, phys);
    if show_dpi {
        if let Some((x_dpi, y_dpi)) = phys.dots_per_inch() {
            line.push_str(&format!(" {:.2} {:.2}", x_dpi, y_dpi));
        }
    }
    line
}

fn main() -> ExitCode {
    let mut cli = cli::Cli::new();
    cli.init();
    cli.setup_logger();

    let mut failures = 0;
    for input_file_path in cli.get_input_file_paths() {
        match read_png_phys_from_path(input_file_path) {
            Ok(phys) => println!("{}", format_phys(input_file_path, &phys, cli.show_dpi)),
            // a bad file does not stop the others from being read
            Err(e) => {
                error!("Error reading pHYs: {}", e.message());
                debug!("{}: {}", input_file_path, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
