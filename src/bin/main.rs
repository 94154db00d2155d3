use pem_thermal::{report, Orientation, RUNS};
use std::path::PathBuf;
use structopt::StructOpt;
use strum::IntoEnumIterator;

#[derive(Debug, StructOpt)]
#[structopt(name = "pem-thermal", about = "PEM thermal test rig charts")]
struct Opt {
    /// Path to the measurement files repository
    #[structopt(long, default_value = "data", parse(from_os_str))]
    data: PathBuf,
    /// Path to the figures repository
    #[structopt(long, default_value = "figures", parse(from_os_str))]
    figures: PathBuf,
    /// Plot the module thermocouples of each run
    #[structopt(long)]
    pem: bool,
    /// Plot the flow inlet and outlet temperatures of each run
    #[structopt(long)]
    flowports: bool,
    /// Plot the average module temperature for each orientation
    #[structopt(short, long)]
    summary: bool,
    /// Add the steady state average and the maximum to the summary plots
    #[structopt(short, long)]
    extended: bool,
    /// Plot the average module temperature of both orientations together
    #[structopt(short, long)]
    comparison: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let summary = opt.summary || !(opt.pem || opt.flowports || opt.comparison);

    if opt.pem {
        for (pem, _) in RUNS {
            let path = report::plot_pem(opt.data.join(pem), &opt.figures)?;
            println!("{:?}", path);
        }
    }
    if opt.flowports {
        for (_, io) in RUNS {
            let path = report::plot_flowports(opt.data.join(io), &opt.figures)?;
            println!("{:?}", path);
        }
    }
    if summary {
        for orientation in Orientation::iter() {
            let data = orientation.data_dir(&opt.data);
            if let Some(path) = report::plot_avg_temp_by_power(data, &opt.figures, opt.extended)? {
                println!("{:?}", path);
            }
        }
    }
    if opt.comparison {
        if let Some(path) = report::plot_comparison(&opt.data, &opt.figures)? {
            println!("{:?}", path);
        }
    }

    Ok(())
}
