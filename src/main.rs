mod http_client;
mod model;
mod quote;
mod storage;

use std::sync::Arc;

use clap::Parser;

use model::config::Config;
use quote::{PricingClient, QuoteService};
use storage::{InMemoryQuoteStore, QuoteStore, SqliteQuoteStore};

/// 运费报价网关
#[derive(Parser, Debug)]
#[command(name = "frete-rs", version, about)]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<String>,

    /// 覆盖监听地址
    #[arg(long)]
    host: Option<String>,

    /// 覆盖监听端口
    #[arg(long)]
    port: Option<u16>,

    /// 使用内存存储（进程退出后数据丢失）
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(args).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("已加载环境文件: {}", path.display());
    }

    let config_path = args
        .config
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let mut config = Config::load(&config_path)?;
    config.apply_env_overrides();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(path) = config.config_path() {
        tracing::info!("配置文件: {}", path.display());
    }

    if config.token.is_empty() || config.registered_number.is_empty() {
        tracing::warn!("未配置发货方 token / registeredNumber，上游将拒绝报价请求");
    }

    let http = http_client::build_client(
        config.proxy_url.as_deref(),
        config.request_timeout_secs,
        config.tls_backend,
    )?;
    let pricing_client = PricingClient::new(http, config.upstream_url.clone());
    tracing::info!("上游运费接口: {}", pricing_client.endpoint());

    let store: Arc<dyn QuoteStore> = if args.in_memory {
        tracing::warn!("使用内存存储，重启后报价记录将丢失");
        Arc::new(InMemoryQuoteStore::new())
    } else {
        tracing::info!("数据库: {}", config.database_path);
        Arc::new(SqliteQuoteStore::open(&config.database_path)?)
    };

    let service = QuoteService::new(config.shipper_identity(), pricing_client, store);
    let app = quote::create_quote_router(Arc::new(service));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("绑定 {} 失败: {}", addr, e))?;

    tracing::info!("启动报价服务: http://{}", addr);
    tracing::info!("可用 API:");
    tracing::info!("  GET  /");
    tracing::info!("  POST /quote");
    tracing::info!("  GET  /metrics?last_quotes=N");

    axum::serve(listener, app).await?;
    Ok(())
}
