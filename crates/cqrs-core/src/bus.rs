//! Command/Query Bus
//!
//! Bus 由 Builder 一次性构建，构建后注册表只读，可在多个任务间共享

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use taskboard_errors::{AppError, AppResult};

use crate::{
    Command, CommandHandler, DispatchMiddleware, DispatchOutcome, HandlerRegistry, MessageKind,
    MessageMeta, Query, QueryHandler,
};

/// Command Bus trait
#[async_trait]
pub trait CommandBus: Send + Sync {
    async fn dispatch<C: Command + 'static>(&self, command: C) -> AppResult<C::Result>;
}

/// Query Bus trait
#[async_trait]
pub trait QueryBus: Send + Sync {
    async fn dispatch<Q: Query + 'static>(&self, query: Q) -> AppResult<Q::Result>;
}

/// 注册表 + 中间件链
struct Pipeline {
    registry: HandlerRegistry,
    middleware: Vec<Arc<dyn DispatchMiddleware>>,
}

impl Pipeline {
    fn new(kind: MessageKind) -> Self {
        Self {
            registry: HandlerRegistry::new(kind),
            middleware: Vec::new(),
        }
    }

    fn resolve<H: ?Sized + Send + Sync + 'static>(&self, name: &'static str) -> AppResult<Arc<H>> {
        let entry = self.registry.resolve(name)?;
        (**entry)
            .downcast_ref::<Arc<H>>()
            .cloned()
            .ok_or_else(|| {
                AppError::unregistered_message(format!(
                    "{} {} (handler bound to a different message type)",
                    self.registry.kind(),
                    name
                ))
            })
    }

    /// 按注册顺序调用 before，逆序调用 after
    async fn run<R, F>(&self, message: MessageMeta, work: F) -> AppResult<R>
    where
        F: Future<Output = AppResult<R>> + Send,
        R: Send,
    {
        for m in &self.middleware {
            m.before(&message);
        }

        let started = Instant::now();
        let result = work.await;
        let outcome = DispatchOutcome {
            elapsed: started.elapsed(),
            error: result.as_ref().err(),
        };

        for m in self.middleware.iter().rev() {
            m.after(&message, &outcome);
        }

        result
    }
}

/// Command Bus 构建器
pub struct CommandBusBuilder {
    pipeline: Pipeline,
}

impl CommandBusBuilder {
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::new(MessageKind::Command),
        }
    }

    /// 注册处理器，每种 Command 只能有一个
    pub fn register<C, H>(&mut self, handler: H) -> AppResult<&mut Self>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        self.register_arc::<C>(Arc::new(handler))
    }

    pub fn register_arc<C: Command>(
        &mut self,
        handler: Arc<dyn CommandHandler<C>>,
    ) -> AppResult<&mut Self> {
        self.pipeline.registry.register(C::NAME, Arc::new(handler))?;
        tracing::debug!(message = C::NAME, "Registered command handler");
        Ok(self)
    }

    pub fn middleware(&mut self, middleware: Arc<dyn DispatchMiddleware>) -> &mut Self {
        self.pipeline.middleware.push(middleware);
        self
    }

    pub fn build(self) -> RegistryCommandBus {
        RegistryCommandBus {
            pipeline: self.pipeline,
        }
    }
}

impl Default for CommandBusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 基于注册表的 Command Bus
pub struct RegistryCommandBus {
    pipeline: Pipeline,
}

impl RegistryCommandBus {
    pub fn builder() -> CommandBusBuilder {
        CommandBusBuilder::new()
    }

    pub fn handles(&self, name: &str) -> bool {
        self.pipeline.registry.contains(name)
    }

    /// 校验所有给定的 Command 都已注册
    pub fn ensure_handles(&self, names: &[&str]) -> AppResult<()> {
        self.pipeline.registry.ensure_handles(names)
    }

    pub fn registered(&self) -> Vec<&'static str> {
        self.pipeline.registry.names()
    }
}

#[async_trait]
impl CommandBus for RegistryCommandBus {
    async fn dispatch<C: Command + 'static>(&self, command: C) -> AppResult<C::Result> {
        let message = MessageMeta {
            kind: MessageKind::Command,
            name: C::NAME,
        };

        self.pipeline
            .run(message, async move {
                let handler = self.pipeline.resolve::<dyn CommandHandler<C>>(C::NAME)?;
                handler.handle(command).await
            })
            .await
    }
}

/// Query Bus 构建器
pub struct QueryBusBuilder {
    pipeline: Pipeline,
}

impl QueryBusBuilder {
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::new(MessageKind::Query),
        }
    }

    /// 注册处理器，每种 Query 只能有一个
    pub fn register<Q, H>(&mut self, handler: H) -> AppResult<&mut Self>
    where
        Q: Query,
        H: QueryHandler<Q> + 'static,
    {
        self.register_arc::<Q>(Arc::new(handler))
    }

    pub fn register_arc<Q: Query>(
        &mut self,
        handler: Arc<dyn QueryHandler<Q>>,
    ) -> AppResult<&mut Self> {
        self.pipeline.registry.register(Q::NAME, Arc::new(handler))?;
        tracing::debug!(message = Q::NAME, "Registered query handler");
        Ok(self)
    }

    pub fn middleware(&mut self, middleware: Arc<dyn DispatchMiddleware>) -> &mut Self {
        self.pipeline.middleware.push(middleware);
        self
    }

    pub fn build(self) -> RegistryQueryBus {
        RegistryQueryBus {
            pipeline: self.pipeline,
        }
    }
}

impl Default for QueryBusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 基于注册表的 Query Bus
pub struct RegistryQueryBus {
    pipeline: Pipeline,
}

impl RegistryQueryBus {
    pub fn builder() -> QueryBusBuilder {
        QueryBusBuilder::new()
    }

    pub fn handles(&self, name: &str) -> bool {
        self.pipeline.registry.contains(name)
    }

    /// 校验所有给定的 Query 都已注册
    pub fn ensure_handles(&self, names: &[&str]) -> AppResult<()> {
        self.pipeline.registry.ensure_handles(names)
    }

    pub fn registered(&self) -> Vec<&'static str> {
        self.pipeline.registry.names()
    }
}

#[async_trait]
impl QueryBus for RegistryQueryBus {
    async fn dispatch<Q: Query + 'static>(&self, query: Q) -> AppResult<Q::Result> {
        let message = MessageMeta {
            kind: MessageKind::Query,
            name: Q::NAME,
        };

        self.pipeline
            .run(message, async move {
                let handler = self.pipeline.resolve::<dyn QueryHandler<Q>>(Q::NAME)?;
                handler.handle(query).await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Increment {
        by: usize,
    }

    impl Command for Increment {
        const NAME: &'static str = "counter.increment";
        type Result = usize;
    }

    struct Fail;

    impl Command for Fail {
        const NAME: &'static str = "counter.fail";
        type Result = ();
    }

    /// 与 Increment 同名但类型不同
    struct Impostor;

    impl Command for Impostor {
        const NAME: &'static str = "counter.increment";
        type Result = ();
    }

    struct Current;

    impl Query for Current {
        const NAME: &'static str = "counter.current";
        type Result = usize;
    }

    #[derive(Clone, Default)]
    struct Counter {
        value: Arc<AtomicUsize>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CommandHandler<Increment> for Counter {
        async fn handle(&self, command: Increment) -> AppResult<usize> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.value.fetch_add(command.by, Ordering::SeqCst) + command.by)
        }
    }

    #[async_trait]
    impl CommandHandler<Fail> for Counter {
        async fn handle(&self, _command: Fail) -> AppResult<()> {
            Err(AppError::not_found("Counter 9"))
        }
    }

    #[async_trait]
    impl QueryHandler<Current> for Counter {
        async fn handle(&self, _query: Current) -> AppResult<usize> {
            Ok(self.value.load(Ordering::SeqCst))
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl DispatchMiddleware for Recorder {
        fn before(&self, message: &MessageMeta) {
            self.events
                .lock()
                .unwrap()
                .push(format!("before {} {}", message.kind, message.name));
        }

        fn after(&self, message: &MessageMeta, outcome: &DispatchOutcome<'_>) {
            self.events
                .lock()
                .unwrap()
                .push(format!("after {} {}", message.name, outcome.label()));
        }
    }

    #[tokio::test]
    async fn test_dispatch_invokes_handler_once() {
        let counter = Counter::default();
        let mut builder = CommandBusBuilder::new();
        builder.register::<Increment, _>(counter.clone()).unwrap();
        let bus = builder.build();

        let result = bus.dispatch(Increment { by: 5 }).await.unwrap();

        assert_eq!(result, 5);
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unregistered_command() {
        let bus = CommandBusBuilder::new().build();

        let err = bus.dispatch(Increment { by: 1 }).await.unwrap_err();
        assert!(matches!(err, AppError::UnregisteredMessage(_)));
        assert!(err.is_configuration_defect());
    }

    #[tokio::test]
    async fn test_duplicate_registration_keeps_first() {
        let first = Counter::default();
        let second = Counter::default();

        let mut builder = CommandBusBuilder::new();
        builder.register::<Increment, _>(first.clone()).unwrap();
        let err = builder
            .register::<Increment, _>(second.clone())
            .err()
            .unwrap();
        assert!(matches!(err, AppError::DuplicateHandler(_)));

        let bus = builder.build();
        bus.dispatch(Increment { by: 2 }).await.unwrap();

        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_name_collision_with_other_type_is_unregistered() {
        let mut builder = CommandBusBuilder::new();
        builder.register::<Increment, _>(Counter::default()).unwrap();
        let bus = builder.build();

        let err = bus.dispatch(Impostor).await.unwrap_err();
        assert!(matches!(err, AppError::UnregisteredMessage(_)));
    }

    #[tokio::test]
    async fn test_handler_error_is_returned_unchanged() {
        let mut builder = CommandBusBuilder::new();
        builder.register::<Fail, _>(Counter::default()).unwrap();
        let bus = builder.build();

        let err = bus.dispatch(Fail).await.unwrap_err();
        assert_eq!(err.to_string(), "Not found: Counter 9");
    }

    #[tokio::test]
    async fn test_query_bus_dispatch() {
        let counter = Counter::default();
        counter.value.store(7, Ordering::SeqCst);

        let mut builder = QueryBusBuilder::new();
        builder.register::<Current, _>(counter).unwrap();
        let bus = builder.build();

        assert_eq!(bus.dispatch(Current).await.unwrap(), 7);
        assert!(bus.handles("counter.current"));
        assert_eq!(bus.registered(), vec!["counter.current"]);
    }

    #[tokio::test]
    async fn test_ensure_handles() {
        let mut builder = CommandBusBuilder::new();
        builder
            .register::<Increment, _>(Counter::default())
            .unwrap()
            .register::<Fail, _>(Counter::default())
            .unwrap();
        let bus = builder.build();

        assert!(bus.ensure_handles(&[Increment::NAME, Fail::NAME]).is_ok());
        assert!(matches!(
            bus.ensure_handles(&["counter.reset"]),
            Err(AppError::UnregisteredMessage(_))
        ));
    }

    #[tokio::test]
    async fn test_middleware_observes_in_order() {
        let outer = Arc::new(Recorder::default());
        let mut builder = CommandBusBuilder::new();
        builder.register::<Fail, _>(Counter::default()).unwrap();
        builder.middleware(outer.clone());
        let bus = builder.build();

        let _ = bus.dispatch(Fail).await;
        let _ = bus.dispatch(Increment { by: 1 }).await;

        let events = outer.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "before command counter.fail",
                "after counter.fail client_error",
                "before command counter.increment",
                "after counter.increment server_error",
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_dispatch() {
        let counter = Counter::default();
        let mut builder = CommandBusBuilder::new();
        builder.register::<Increment, _>(counter.clone()).unwrap();
        let bus = Arc::new(builder.build());

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let bus = bus.clone();
                tokio::spawn(async move { bus.dispatch(Increment { by: 1 }).await })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(counter.calls.load(Ordering::SeqCst), 32);
        assert_eq!(counter.value.load(Ordering::SeqCst), 32);
    }
}
