// encrypt: encrypts a stream with a public key after checking its identity signature

use anyhow::Context;
use rsa_tool::config::{StreamConfig, DEFAULT_PUBLIC_KEY};
use rsa_tool::rsa::encrypt_stream;
use rsa_tool::util::{cli, load_public_key, open_input, open_output};

fn run(config: &StreamConfig) -> anyhow::Result<()> {
    let key = load_public_key(&config.key)
        .with_context(|| format!("cannot open public key file {}", config.key.display()))?;

    log::info!("username: {}", key.identity);
    log::info!("user signature ({} bits): {}", key.signature.bits(), key.signature);
    log::info!("n - modulus ({} bits): {}", key.n.bits(), key.n);
    log::info!("e - public exponent ({} bits): {}", key.e.bits(), key.e);

    key.verify_identity()?;

    let input = open_input(config.input.as_deref()).with_context(|| {
        format!("could not open {}", cli::stream_name(config.input.as_deref(), "standard input"))
    })?;
    let output = open_output(config.output.as_deref()).with_context(|| {
        format!("could not create {}", cli::stream_name(config.output.as_deref(), "standard output"))
    })?;

    let summary = encrypt_stream(input, output, &key)?;
    if summary.skipped > 0 {
        log::warn!("{} blocks could not be encrypted", summary.skipped);
    }
    Ok(())
}

fn main() {
    let cmd = cli::stream_command(
        "encrypt",
        "Encrypts an input file using the specified public key file, writing the result \
         to the specified output file.",
        "Public key file",
        DEFAULT_PUBLIC_KEY,
    );
    let m = cli::parse_args(cmd);
    cli::init_logger(m.get_flag("verbose"));
    cli::exit_on_error("encrypt", run(&cli::stream_config(&m)));
}
