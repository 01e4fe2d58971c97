#[actix_web::main]
async fn main() -> std::io::Result<()> {
    stewards_decision_server::run().await
}
