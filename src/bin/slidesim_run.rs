use slidesim::prelude::*;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "slidesim_run",
    about = "Runs a rainfall-induced landslide simulation from a JSON input file"
)]
struct Options {
    /// JSON file with the simulation input
    input: String,

    /// Output directory (default is /tmp/slidesim/results)
    #[structopt(short, long)]
    out_dir: Option<String>,

    /// Filename stem of the output files
    #[structopt(short, long, default_value = "slidesim")]
    fn_stem: String,
}

fn main() -> Result<(), StrError> {
    env_logger::init();

    // parse options
    let options = Options::from_args();

    // load data
    let input = SimInput::read_json(&options.input)?;

    // run simulation
    let sim = Simulation::new(&input)?;
    let mut file_io = FileIo::new_enabled(&options.fn_stem, options.out_dir.as_deref())?;
    let last = sim.run(&mut file_io)?;

    // message
    let path_summary = file_io.path_summary();
    let thin_line = format!("{:─^1$}", "", path_summary.len());
    println!("\n\n{}", thin_line);
    println!("t = {}  FS_min = {}", last.t, last.fs_min());
    println!("landslides = {}  debris flows = {}", last.n_landslide(), last.n_debris_flow());
    println!("the summary file is:");
    println!("{}", path_summary);
    println!("{}\n\n", thin_line);
    Ok(())
}
