use strategic_analyst::application::CheckConnectionHandler;

use super::AppContext;

pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let mut session = ctx.session();
    let handler = CheckConnectionHandler::new(ctx.client.clone(), ctx.base_url());

    let status = handler.handle(&mut session).await;
    if !status.is_connected() {
        anyhow::bail!("{}", status.label());
    }

    println!("{} ({})", status.label(), session.model());
    Ok(())
}
