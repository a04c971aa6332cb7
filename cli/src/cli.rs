use getopts::Options;
use log::{info, Level};

/// Exit code for bad command line usage (EX_USAGE).
pub const EXIT_USAGE: i32 = 64;

pub struct Cli {
    /// Default: false. Activates debug outputs.
    pub debug: bool,

    /// Default: false. Activates trace outputs, one line per chunk read.
    pub trace: bool,

    /// Default: false. Activates verbose outputs.
    pub verbose: bool,

    /// Default: false. Prints dots per inch next to the raw densities
    /// when the unit is the metre.
    pub show_dpi: bool,

    /// Required. Paths to the input PNG files.
    input_files: Vec<String>,
}

/// There are better options out there,
/// but using getopts significantly reduces the binary size
impl Cli {
    pub fn new() -> Self {
        Cli {
            debug: false,
            trace: false,
            verbose: false,
            show_dpi: false,
            input_files: vec![],
        }
    }

    fn options() -> Options {
        let mut opts = Options::new();
        opts.optmulti(
            "i",
            "input",
            "[Required] Path to an input PNG file. Can be given more than once.",
            "PATH_TO_PNG_FILE",
        );
        opts.optflag(
            "",
            "dpi",
            "[Default]: false. Also prints dots per inch when the unit is the metre.",
        );
        opts.optflag(
            "v",
            "verbose",
            "[Default]: false. Activates verbose outputs.",
        );
        opts.optflag(
            "d",
            "debug",
            "[Default]: false. Activates debug outputs.",
        );
        opts.optflag(
            "",
            "trace",
            "[Default]: false. Logs every chunk header that is read.",
        );
        opts.optflag("h", "help", "print this help menu");
        opts
    }

    /// Parses `args` (without the program name). Returns an error message on bad usage.
    pub fn parse(&mut self, args: &[String]) -> Result<bool, String> {
        let opts = Self::options();
        let matches = opts.parse(args).map_err(|f| f.to_string())?;

        if matches.opt_present("h") {
            return Ok(false);
        }

        self.verbose = matches.opt_present("v");
        self.debug = matches.opt_present("d");
        self.trace = matches.opt_present("trace");
        self.show_dpi = matches.opt_present("dpi");
        self.input_files = matches.opt_strs("i");
        self.input_files.extend(matches.free);

        if self.input_files.is_empty() {
            return Err("Required option 'input' missing.".to_string());
        }
        Ok(true)
    }

    pub fn init(&mut self) {
        let args: Vec<String> = std::env::args().collect();

        match self.parse(&args[1..]) {
            Ok(true) => (),
            Ok(false) => {
                self.print_usage();
                std::process::exit(EXIT_USAGE);
            }
            Err(f) => {
                println!("{}", f);
                self.print_usage();
                std::process::exit(EXIT_USAGE);
            }
        }
    }

    pub fn log_level(&self) -> Level {
        if self.trace {
            Level::Trace
        } else if self.debug {
            Level::Debug
        } else if self.verbose {
            Level::Info
        } else {
            Level::Warn
        }
    }

    /// Set up logging options
    pub fn setup_logger(&self) {
        let log_level = self.log_level();

        if let Err(reason) = simple_logger::init_with_level(log_level) {
            eprintln!("Could not initialize logger: {}", reason);
            return;
        }

        info!("Initialized logger");
        info!("Log level :{}", log_level);
    }

    pub fn get_input_file_paths(&self) -> &[String] {
        &self.input_files
    }

    fn print_usage(&self) {
        let brief = "Usage: png-phys [-i|--input PATH_TO_PNG_FILE]... [-h|--help] [-v|--verbose] [-d|--debug] [--trace] [--dpi]";
        print!("{}", Self::options().usage(brief));
    }
}
