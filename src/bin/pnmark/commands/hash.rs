use crate::error::Result;
use crate::output::Output;
use crate::util::{expand_inputs, load_buffer};
use crate::Context;
use clap::Args;
use pnmark::binder::audio_hash;

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Input files (supports glob).
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs)?;
    for input in &inputs {
        let buffer = load_buffer(input)?;
        ctx.out.info_diag(format!(
            "{}: {} samples, {} Hz, {} ch, {}-bit",
            input.display(),
            buffer.len(),
            buffer.sample_rate(),
            buffer.channels(),
            buffer.sample_format().bits_per_sample()
        ));
        let digest = hex::encode(audio_hash(&buffer));
        if inputs.len() == 1 {
            Output::result(digest);
        } else {
            Output::result(format!("{digest}  {}", input.display()));
        }
    }
    Ok(())
}
