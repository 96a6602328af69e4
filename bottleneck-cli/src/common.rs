use anyhow::Context as _;
use async_trait::async_trait;
use bottleneck::{Catalog, CsvDirectory, OptionLists, Settings};
use erased_serde::Serializer;
use tokio::sync::OnceCell;

/// What a command needs besides its arguments. Data is loaded on first use.
pub struct Context {
    settings: Settings,
    catalog: Catalog,
    options: OnceCell<OptionLists>,
}

impl Context {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            catalog: Catalog::new(),
            options: OnceCell::new(),
        }
    }

    pub async fn catalog(&self) -> anyhow::Result<&Catalog> {
        let dir = &self.settings.catalog_dir;
        self.catalog
            .load(&CsvDirectory::new(dir))
            .await
            .with_context(|| format!("loading the catalog from {}", dir.display()))?;
        Ok(&self.catalog)
    }

    pub async fn options(&self) -> &OptionLists {
        self.options
            .get_or_init(|| async {
                OptionLists::load(self.settings.options.sources())
                    .await
                    .with_cap(self.settings.option_list_cap)
            })
            .await
    }
}

#[async_trait]
pub trait Run {
    async fn run(
        &self,
        ctx: &Context,
        serializer: &mut (dyn Serializer + Send),
    ) -> anyhow::Result<()>;
}

#[macro_export]
macro_rules! run_impl_enum {
    ($i:ident, $self:ident, $ctx:ident, $ser:ident, $b:block) => {
        #[async_trait::async_trait]
        impl $crate::common::Run for $i {
            async fn run(
                &$self,
                $ctx: &$crate::common::Context,
                $ser: &mut (dyn erased_serde::Serializer + Send),
            ) -> anyhow::Result<()> {
                $b;

                Ok(())
            }
        }
    }
}

#[macro_export]
macro_rules! run_impl_struct {
    ($i:ident, $b:ident) => {
        #[async_trait::async_trait]
        impl $crate::common::Run for $i {
            async fn run(
                &self,
                ctx: &$crate::common::Context,
                serializer: &mut (dyn erased_serde::Serializer + Send),
            ) -> anyhow::Result<()> {
                self.$b.run(ctx, serializer).await
            }
        }
    };
}
