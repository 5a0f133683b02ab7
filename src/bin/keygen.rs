// keygen: generates an RSA key pair and signs the user's identity

use anyhow::Context;
use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use rsa_tool::config::{
    KeygenConfig, DEFAULT_BITS, DEFAULT_ITERS, DEFAULT_PRIVATE_KEY, DEFAULT_PUBLIC_KEY,
};
use rsa_tool::rsa::{generate_keypair, rand_state, RsaKeyPair};
use rsa_tool::util::{cli, save_keypair};
use std::path::PathBuf;

fn command() -> Command {
    Command::new("keygen")
        .version(crate_version!())
        .about(
            "Generates a public / private key pair, placing the keys into the public and \
             private key files. The modulus n has the number of bits given by -b.",
        )
        .arg(
            Arg::new("bits")
                .short('b')
                .value_name("BITS")
                .action(ArgAction::Set)
                .default_value(DEFAULT_BITS.to_string())
                .value_parser(value_parser!(u64))
                .help("Public modulus n has BITS bits (50-4096)"),
        )
        .arg(
            Arg::new("iters")
                .short('i')
                .value_name("ITERS")
                .action(ArgAction::Set)
                .default_value(DEFAULT_ITERS.to_string())
                .value_parser(value_parser!(u32))
                .help("Run ITERS Miller-Rabin iterations for primality testing (1-500)"),
        )
        .arg(
            Arg::new("public")
                .short('n')
                .value_name("PBFILE")
                .action(ArgAction::Set)
                .default_value(DEFAULT_PUBLIC_KEY)
                .value_parser(value_parser!(PathBuf))
                .help("Public key file"),
        )
        .arg(
            Arg::new("private")
                .short('d')
                .value_name("PVFILE")
                .action(ArgAction::Set)
                .default_value(DEFAULT_PRIVATE_KEY)
                .value_parser(value_parser!(PathBuf))
                .help("Private key file"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .value_name("SEED")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64))
                .help("Random number seed. Default: seconds since the Unix epoch"),
        )
        .arg(
            Arg::new("user")
                .short('u')
                .long("user")
                .value_name("NAME")
                .action(ArgAction::Set)
                .env("USER")
                .required(true)
                .help("Identity signed into the public key"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
        )
}

fn keygen_config(m: &ArgMatches) -> KeygenConfig {
    let mut config = KeygenConfig::default()
        .with_bits(m.get_one::<u64>("bits").copied().unwrap_or(DEFAULT_BITS))
        .with_iters(m.get_one::<u32>("iters").copied().unwrap_or(DEFAULT_ITERS))
        .with_identity(m.get_one::<String>("user").cloned().unwrap_or_default());

    if let (Some(public), Some(private)) = (
        m.get_one::<PathBuf>("public"),
        m.get_one::<PathBuf>("private"),
    ) {
        config = config.with_key_files(public.clone(), private.clone());
    }
    if let Some(seed) = m.get_one::<u64>("seed") {
        config = config.with_seed(*seed);
    }
    config
}

fn log_keypair(keypair: &RsaKeyPair) {
    let public = &keypair.public_key;
    let private = &keypair.private_key;
    log::info!("username: {}", public.identity);
    log::info!("user signature ({} bits): {}", public.signature.bits(), public.signature);
    log::info!("p ({} bits): {}", keypair.p.bits(), keypair.p);
    log::info!("q ({} bits): {}", keypair.q.bits(), keypair.q);
    log::info!("n - modulus ({} bits): {}", public.n.bits(), public.n);
    log::info!("e - public exponent ({} bits): {}", public.e.bits(), public.e);
    log::info!("d - private exponent ({} bits): {}", private.d.bits(), private.d);
}

fn run(config: &KeygenConfig) -> anyhow::Result<()> {
    config.validate()?;
    log::debug!("keygen seed {}", config.seed);

    let mut rng = rand_state(config.seed);
    let keypair = generate_keypair(config.bits, config.iters, &config.identity, &mut rng)
        .context("key generation failed")?;

    save_keypair(&keypair, &config.public_key, &config.private_key).with_context(|| {
        format!(
            "cannot write key files {} and {}",
            config.public_key.display(),
            config.private_key.display()
        )
    })?;

    log_keypair(&keypair);
    Ok(())
}

fn main() {
    let m = cli::parse_args(command());
    cli::init_logger(m.get_flag("verbose"));
    cli::exit_on_error("keygen", run(&keygen_config(&m)));
}
