// decrypt: decrypts hex ciphertext lines with a private key

use anyhow::Context;
use rsa_tool::config::{StreamConfig, DEFAULT_PRIVATE_KEY};
use rsa_tool::rsa::decrypt_stream;
use rsa_tool::util::{cli, load_private_key, open_input, open_output};

fn run(config: &StreamConfig) -> anyhow::Result<()> {
    let key = load_private_key(&config.key)
        .with_context(|| format!("cannot open private key file {}", config.key.display()))?;

    log::info!("n - modulus ({} bits): {}", key.n.bits(), key.n);
    log::info!("d - private exponent ({} bits): {}", key.d.bits(), key.d);

    let input = open_input(config.input.as_deref()).with_context(|| {
        format!("could not open {}", cli::stream_name(config.input.as_deref(), "standard input"))
    })?;
    let output = open_output(config.output.as_deref()).with_context(|| {
        format!("could not create {}", cli::stream_name(config.output.as_deref(), "standard output"))
    })?;

    decrypt_stream(input, output, &key)?;
    Ok(())
}

fn main() {
    let cmd = cli::stream_command(
        "decrypt",
        "Decrypts an input file using the specified private key file, writing the result \
         to the specified output file.",
        "Private key file",
        DEFAULT_PRIVATE_KEY,
    );
    let m = cli::parse_args(cmd);
    cli::init_logger(m.get_flag("verbose"));
    cli::exit_on_error("decrypt", run(&cli::stream_config(&m)));
}
