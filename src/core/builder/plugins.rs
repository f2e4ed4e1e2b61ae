//! `plugins` section

use super::BuildContext;
use crate::adapters::Interceptor;
use crate::config::Node;
use crate::domain::Result;

pub(super) fn run(section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    let Some(section) = section else {
        return Ok(());
    };

    for child in section.children() {
        let name = child.required_attribute("interceptor")?;
        let interceptor = ctx
            .configuration
            .resolver()
            .instantiate::<dyn Interceptor>(&name, child.children_as_properties())?;
        tracing::debug!(interceptor = %name, "Installed plugin");
        ctx.configuration.add_interceptor(interceptor);
    }
    Ok(())
}
