use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::rc::Rc;

use clitree::tags::{tagged_opts, Field, Tagged};
use clitree::{exit, logging, CliError, Command, Opt, OptType, Value};

struct MainConfig {
    debug: bool,
}

impl Tagged for MainConfig {
    fn fields() -> Vec<Field<Self>> {
        vec![Field::bool("debug", |c: &mut MainConfig| &mut c.debug)
            .tag("name=debug desc='turn on debugging'")]
    }
}

struct AConfig {
    name: String,
    level: i64,
    json: bool,
}

impl Tagged for AConfig {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::embedded("command"),
            Field::string("name", |c: &mut AConfig| &mut c.name)
                .tag("name=n aliases=name,na desc=name default=sam"),
            Field::int("level", |c: &mut AConfig| &mut c.level)
                .tag(r"name=level aliases=l desc='A\'s level'"),
            Field::bool("json", |c: &mut AConfig| &mut c.json)
                .tag("name=json desc='print option values as JSON'"),
        ]
    }
}

fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    let tree = main_command()?.build();
    exit::main(&tree)
}

fn main_command() -> anyhow::Result<Command> {
    let cfg = Rc::new(RefCell::new(MainConfig { debug: false }));
    let opts = tagged_opts(&cfg)?;
    Ok(Command::new("clitree")
        .with_synopsis("clitree run me and see")
        .with_description("clitree is a demo of nested commands with scoped options")
        .with_opts(opts)
        .with_subs([a_command()?, b_command()]))
}

fn a_command() -> anyhow::Result<Command> {
    let cfg = Rc::new(RefCell::new(AConfig {
        name: String::new(),
        level: 0,
        json: false,
    }));
    let opts = tagged_opts(&cfg)?;
    Ok(Command::new("a")
        .with_synopsis("a the a command exits code equal to the number of args")
        .with_opts(opts)
        .with_run(move |cmd, ctx, args| {
            let args = cmd.parse(ctx, args).into_result()?;
            let cfg = cfg.borrow();
            tracing::debug!(name = %cfg.name, level = cfg.level, "Running a");
            writeln!(ctx.out, "should exit {}", args.len())?;
            if cfg.json {
                let values = serde_json::to_string(&cmd.values()).map_err(anyhow::Error::from)?;
                writeln!(ctx.out, "{values}")?;
            }
            match args.len() {
                0 => Ok(()),
                n => Err(CliError::ExitCode(n as i32)),
            }
        }))
}

fn b_command() -> Command {
    let env = Rc::new(RefCell::new(BTreeMap::<String, String>::new()));
    let env_type = {
        let env = Rc::clone(&env);
        OptType::func("env", move |text: &str| {
            let Some((key, value)) = text.split_once('=') else {
                return Err(CliError::usage("-e expected key=value"));
            };
            env.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(Value::Unit)
        })
    };
    Command::new("b")
        .with_aliases(["bb", "bbb"])
        .with_synopsis("b cool and use clitree")
        .with_description("b is a subcommand")
        .with_opt(Opt::new("e", env_type).with_description("set environment"))
        .with_run(move |cmd, ctx, args| {
            let args = cmd.parse(ctx, args).into_result()?;
            writeln!(ctx.out, "args: [{}]", args.join(" "))?;
            let env = env.borrow();
            for (key, value) in env.iter() {
                writeln!(ctx.out, "\t{key}: {value}")?;
            }
            if env.is_empty() && args.is_empty() {
                return Err(CliError::usage("please supply some -e flags or args"));
            }
            Ok(())
        })
}
