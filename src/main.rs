// ==========================================
// blob2d 参数模板 - 命令行入口
// ==========================================
// 子命令:
//   resolve  解析模板并输出取值 (JSON)
//   render   渲染模板并写入运行目录
//   vars     列出模板引用的替换变量
// ==========================================

use anyhow::{Context, Result};
use blob2d_template::config::SubstitutionVars;
use blob2d_template::template::DEFAULT_TARGET_FILENAME;
use blob2d_template::TemplateApi;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "blob2d-template", version, about = "blob2d 参数模板加载器")]
struct Cli {
    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct VarArgs {
    /// 参数文件（JSON），缺省使用内置 blob2d 参数空间
    #[arg(long)]
    params: Option<PathBuf>,

    /// 变量赋值 NAME=VALUE，可重复
    #[arg(long = "set", value_name = "NAME=VALUE")]
    sets: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 解析模板并输出已解析取值
    Resolve {
        template: PathBuf,

        #[command(flatten)]
        vars: VarArgs,

        /// 覆盖项 PATH=VALUE（如 nout=3、mesh:ddx.first=C4），可重复
        #[arg(long = "override", value_name = "PATH=VALUE")]
        overrides: Vec<String>,

        /// 只输出单个键路径的取值（含 `all` 回退）
        #[arg(long)]
        get: Option<String>,
    },
    /// 渲染模板并写入运行目录
    Render {
        template: PathBuf,

        #[command(flatten)]
        vars: VarArgs,

        /// 运行目录
        #[arg(long)]
        out: PathBuf,

        /// 输入文件名
        #[arg(long, default_value = DEFAULT_TARGET_FILENAME)]
        target: String,
    },
    /// 列出模板引用的替换变量
    Vars { template: PathBuf },
}

/// 参数空间 + 命令行赋值 → API 与替换变量映射
fn build_api(args: &VarArgs) -> Result<(TemplateApi, SubstitutionVars)> {
    let api = match &args.params {
        Some(path) => TemplateApi::with_param_file(path)
            .with_context(|| format!("无法加载参数文件: {}", path.display()))?,
        None => TemplateApi::default(),
    };
    let vars = api.build_vars(&args.sets)?;
    Ok((api, vars))
}

fn run_resolve(
    template: &Path,
    args: &VarArgs,
    overrides: &[String],
    get: Option<&str>,
) -> Result<()> {
    let (api, vars) = build_api(args)?;
    let config = api
        .resolve(template, &vars, overrides)
        .with_context(|| format!("模板加载失败: {}", template.display()))?;

    match get {
        Some(path) => println!("{}", TemplateApi::lookup(&config, path)?),
        None => println!("{}", TemplateApi::to_json(&config)?),
    }
    Ok(())
}

fn run_render(template: &Path, args: &VarArgs, out: &Path, target: &str) -> Result<()> {
    let (api, vars) = build_api(args)?;
    let written = api
        .render(template, &vars, out, target)
        .with_context(|| format!("模板渲染失败: {}", template.display()))?;

    println!("{}", written.display());
    Ok(())
}

fn run_vars(template: &Path) -> Result<()> {
    let names = TemplateApi::default()
        .list_variables(template)
        .with_context(|| format!("模板解析失败: {}", template.display()))?;

    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    blob2d_template::logging::init(cli.json_log);

    tracing::debug!(version = blob2d_template::VERSION, "{}", blob2d_template::APP_NAME);

    match &cli.command {
        Command::Resolve {
            template,
            vars,
            overrides,
            get,
        } => run_resolve(template, vars, overrides, get.as_deref()),
        Command::Render {
            template,
            vars,
            out,
            target,
        } => run_render(template, vars, out, target),
        Command::Vars { template } => run_vars(template),
    }
}
