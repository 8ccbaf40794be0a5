//! Category taxonomy management (main items and sub items).

use tracing::info;

use gc_core::error::{ErrorCode, GcError, GcResult};
use gc_core::validation::Validate;
use gc_models::{queries, Database, MainItem, SubItem};

use crate::dto::{
    MainItemCreateRequest, MainItemResponse, MainItemUpdateRequest, MainItemsResponse,
    SubItemCreateRequest, SubItemResponse, SubItemUpdateRequest, SubItemsResponse,
};
use crate::event_bus::{AppEvent, EventBus};
use crate::service::{Service, ServiceState};

pub struct ItemService {
    state: ServiceState,
    database: Database,
    event_bus: EventBus,
}

impl ItemService {
    pub fn new(database: Database, event_bus: EventBus) -> Self {
        Self {
            state: ServiceState::Created,
            database,
            event_bus,
        }
    }

    // ─── Main items ──────────────────────────────────────────────────────

    pub fn create_main_item(&self, request: &MainItemCreateRequest) -> GcResult<MainItemResponse> {
        request.validate()?;
        let conn = self.database.conn()?;
        if MainItem::exists_by_name(&conn, &request.name, None)? {
            return Err(GcError::Duplicated(ErrorCode::DuplicatedMainItemName));
        }

        let mut item = MainItem::new(&request.name, &request.description);
        let id = item.save(&conn)?;

        info!(main_item_id = id, name = %item.name, "main item created");
        self.event_bus.emit(AppEvent::CatalogChanged { main_item_id: id });
        Ok(MainItemResponse::from(&item))
    }

    pub fn find_all_main_items(&self) -> GcResult<MainItemsResponse> {
        let conn = self.database.conn()?;
        let items = MainItem::find_all(&conn)?;
        Ok(MainItemsResponse::from(items.as_slice()))
    }

    pub fn find_main_item(&self, id: i64) -> GcResult<MainItemResponse> {
        let conn = self.database.conn()?;
        MainItem::find_by_id(&conn, id)?
            .map(|m| MainItemResponse::from(&m))
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundMainItem))
    }

    pub fn update_main_item(&self, id: i64, request: &MainItemUpdateRequest) -> GcResult<i64> {
        request.validate()?;
        let conn = self.database.conn()?;
        let mut item = MainItem::find_by_id(&conn, id)?
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundMainItem))?;
        if MainItem::exists_by_name(&conn, &request.name, Some(id))? {
            return Err(GcError::Duplicated(ErrorCode::DuplicatedMainItemName));
        }

        item.name = request.name.clone();
        item.description = request.description.clone();
        item.update(&conn)?;

        self.event_bus.emit(AppEvent::CatalogChanged { main_item_id: id });
        Ok(id)
    }

    /// Delete a main item and, by cascade, its sub items.
    pub fn delete_main_item(&self, id: i64) -> GcResult<()> {
        let conn = self.database.conn()?;
        if !MainItem::delete(&conn, id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMainItem));
        }
        info!(main_item_id = id, "main item deleted");
        self.event_bus.emit(AppEvent::CatalogChanged { main_item_id: id });
        Ok(())
    }

    // ─── Sub items ───────────────────────────────────────────────────────

    /// Create a sub item under an existing main item (`I001` otherwise).
    pub fn create_sub_item(&self, request: &SubItemCreateRequest) -> GcResult<SubItemResponse> {
        request.validate()?;
        let Some(main_item_id) = request.main_item_id else {
            return Err(GcError::Internal("validated sub item request is missing mainItemId".into()));
        };

        let conn = self.database.conn()?;
        if !MainItem::exists_by_id(&conn, main_item_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMainItem));
        }
        if SubItem::exists_by_name(&conn, main_item_id, &request.name, None)? {
            return Err(GcError::Duplicated(ErrorCode::DuplicatedSubItemName));
        }

        let mut item = SubItem::new(main_item_id, &request.name, &request.description);
        let id = item.save(&conn)?;

        info!(sub_item_id = id, main_item_id, "sub item created");
        self.event_bus.emit(AppEvent::CatalogChanged { main_item_id });
        Ok(SubItemResponse::from(&item))
    }

    pub fn find_all_sub_items(&self) -> GcResult<SubItemsResponse> {
        let conn = self.database.conn()?;
        let items = SubItem::find_all(&conn)?;
        Ok(SubItemsResponse::from(items.as_slice()))
    }

    pub fn find_all_sub_items_by_main_item(&self, main_item_id: i64) -> GcResult<SubItemsResponse> {
        let conn = self.database.conn()?;
        if !MainItem::exists_by_id(&conn, main_item_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMainItem));
        }
        let items = queries::sub_items_by_main_item(&conn, main_item_id)?;
        Ok(SubItemsResponse::from(items.as_slice()))
    }

    pub fn find_sub_item(&self, id: i64) -> GcResult<SubItemResponse> {
        let conn = self.database.conn()?;
        SubItem::find_by_id(&conn, id)?
            .map(|s| SubItemResponse::from(&s))
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundSubItem))
    }

    pub fn update_sub_item(&self, id: i64, request: &SubItemUpdateRequest) -> GcResult<i64> {
        request.validate()?;
        let conn = self.database.conn()?;
        let mut item = SubItem::find_by_id(&conn, id)?
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundSubItem))?;
        if SubItem::exists_by_name(&conn, item.main_item_id, &request.name, Some(id))? {
            return Err(GcError::Duplicated(ErrorCode::DuplicatedSubItemName));
        }

        item.name = request.name.clone();
        item.description = request.description.clone();
        item.update(&conn)?;

        self.event_bus.emit(AppEvent::CatalogChanged { main_item_id: item.main_item_id });
        Ok(id)
    }

    pub fn delete_sub_item(&self, id: i64) -> GcResult<()> {
        let conn = self.database.conn()?;
        let item = SubItem::find_by_id(&conn, id)?
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundSubItem))?;
        SubItem::delete(&conn, id)?;
        self.event_bus.emit(AppEvent::CatalogChanged { main_item_id: item.main_item_id });
        Ok(())
    }
}

impl Service for ItemService {
    fn name(&self) -> &str {
        "item"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> GcResult<()> {
        self.state = ServiceState::Initializing;
        let conn = self.database.conn()?;
        let count = MainItem::find_all(&conn)?.len();
        self.state = ServiceState::Running;
        info!(main_items = count, "item service initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> GcResult<()> {
        self.state = ServiceState::Stopped;
        info!("item service stopped");
        Ok(())
    }
}
