use anyhow::Result;
use clap::Parser;

use std::io::{self, Write};
use std::path::PathBuf;

use subsift::opts::Opts;
use subsift::output_type::OutputType;
use subsift::parser::ParseOpts;
use subsift::pipeline::convert_batch;

fn main() -> Result<()> {
    subsift::logging::init();
    let params = get_params()?;

    let opts = Opts {
        parse: if params.strict {
            ParseOpts::strict()
        } else {
            ParseOpts::default()
        },
        output_type: params.output_type,
    };

    let summary = convert_batch(&params.inputs, &params.out_dir, &opts)?;

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    serde_json::to_writer_pretty(&mut writer, &summary)?;
    writeln!(&mut writer)?;

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "subsift")]
#[command(about = "Convert SRT subtitle files to JSON")]
struct Params {
    /// Subtitle files to convert.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(short = 'd', long = "out-dir", default_value = "srt_json")]
    pub out_dir: PathBuf,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Json
    )]
    pub output_type: OutputType,

    /// Strict SRT conformance: reject dot millisecond separators and blocks
    /// missing their index line.
    #[arg(long = "strict", default_value_t = false)]
    pub strict: bool,
}

fn get_params() -> Result<Params> {
    Ok(Params::parse())
}
