//! `objectFactory`, `objectWrapperFactory` and `reflectorFactory` sections
//!
//! Each replaces the corresponding default when present.

use super::BuildContext;
use crate::adapters::{ObjectFactory, ObjectWrapperFactory, ReflectorFactory};
use crate::config::Node;
use crate::core::registry::ExtensionType;
use crate::domain::Result;

fn instantiate<T>(section: &Node<'_>, ctx: &BuildContext<'_>) -> Result<Box<T>>
where
    T: ExtensionType + ?Sized,
{
    let type_name = section.required_attribute("type")?;
    ctx.configuration
        .resolver()
        .instantiate::<T>(&type_name, section.children_as_properties())
}

pub(super) fn object_factory(section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    if let Some(section) = section {
        let factory = instantiate::<dyn ObjectFactory>(section, ctx)?;
        ctx.configuration.set_object_factory(factory);
    }
    Ok(())
}

pub(super) fn object_wrapper_factory(
    section: Option<&Node<'_>>,
    ctx: &mut BuildContext<'_>,
) -> Result<()> {
    if let Some(section) = section {
        let factory = instantiate::<dyn ObjectWrapperFactory>(section, ctx)?;
        ctx.configuration.set_object_wrapper_factory(factory);
    }
    Ok(())
}

pub(super) fn reflector_factory(
    section: Option<&Node<'_>>,
    ctx: &mut BuildContext<'_>,
) -> Result<()> {
    if let Some(section) = section {
        let factory = instantiate::<dyn ReflectorFactory>(section, ctx)?;
        ctx.configuration.set_reflector_factory(factory);
    }
    Ok(())
}
