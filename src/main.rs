#[tokio::main]
async fn main() {
    if let Err(e) = gang_manager_lib::run().await {
        eprintln!("gang-manager 启动失败: {}", e);
        std::process::exit(1);
    }
}
