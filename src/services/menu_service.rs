use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::menu::{
        CategoryList, CreateCategoryRequest, CreateMenuItemRequest, MenuItemList,
        UpdateCategoryRequest, UpdateMenuItemRequest,
    },
    entity::{
        categories::{
            ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories,
            Model as CategoryModel,
        },
        menu_items::{
            ActiveModel as MenuItemActive, Column as MenuCol, Entity as MenuItems,
            Model as MenuItemModel,
        },
        order_items::{Column as OrderItemCol, Entity as OrderItems},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, MenuItem},
    response::{ApiResponse, Meta},
    routes::params::{MenuQuery, MenuSortBy, SortOrder},
    services::{optional_text, require_text},
    state::AppState,
};

pub const DEFAULT_POPULAR_LIMIT: u64 = 5;
pub const MAX_POPULAR_LIMIT: u64 = 20;

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items: Vec<Category> = Categories::find()
        .order_by_asc(CategoryCol::Name)
        .all(state.db())
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let name = require_text(&payload.name, "name")?;

    ensure_category_name_free(state, &name, None).await?;

    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        description: Set(optional_text(payload.description)),
        created_at: NotSet,
    }
    .insert(state.db())
    .await?;

    audit::record(
        state.db(),
        Some(user.user_id),
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let existing = Categories::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: CategoryActive = existing.into();
    if let Some(name) = payload.name {
        let name = require_text(&name, "name")?;
        ensure_category_name_free(state, &name, Some(id)).await?;
        active.name = Set(name);
    }
    if payload.description.is_some() {
        active.description = Set(optional_text(payload.description));
    }
    let category = active.update(state.db()).await?;

    Ok(ApiResponse::success(
        "Updated",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let in_use = MenuItems::find()
        .filter(MenuCol::CategoryId.eq(id))
        .one(state.db())
        .await?;
    if in_use.is_some() {
        return Err(AppError::Conflict(
            "category still has menu items".to_string(),
        ));
    }

    let result = Categories::delete_by_id(id).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state.db(),
        Some(user.user_id),
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(ApiResponse::done("Deleted"))
}

pub async fn list_menu_items(
    state: &AppState,
    query: MenuQuery,
) -> AppResult<ApiResponse<MenuItemList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(MenuCol::Name).ilike(pattern.clone()))
                .add(Expr::col(MenuCol::Description).ilike(pattern)),
        );
    }
    if let Some(category_id) = query.category_id {
        condition = condition.add(MenuCol::CategoryId.eq(category_id));
    }
    if let Some(in_stock) = query.in_stock {
        condition = condition.add(MenuCol::InStock.eq(in_stock));
    }
    if let Some(min_price) = query.min_price {
        condition = condition.add(MenuCol::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        condition = condition.add(MenuCol::Price.lte(max_price));
    }

    let sort_col = match query.sort_by.unwrap_or(MenuSortBy::CreatedAt) {
        MenuSortBy::CreatedAt => MenuCol::CreatedAt,
        MenuSortBy::Price => MenuCol::Price,
        MenuSortBy::Name => MenuCol::Name,
        MenuSortBy::Popularity => MenuCol::OrderCount,
    };

    let mut finder = MenuItems::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(state.db()).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?
        .into_iter()
        .map(menu_item_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Menu", MenuItemList { items }, Some(meta)))
}

pub async fn get_menu_item(state: &AppState, id: Uuid) -> AppResult<ApiResponse<MenuItem>> {
    let item = MenuItems::find_by_id(id)
        .one(state.db())
        .await?
        .map(menu_item_from_entity)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Menu item", item, None))
}

pub async fn create_menu_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    ensure_admin(user)?;
    let name = require_text(&payload.name, "name")?;
    validate_price(payload.price)?;
    ensure_category(state, payload.category_id).await?;

    let item = MenuItemActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        price: Set(payload.price),
        category_id: Set(payload.category_id),
        order_count: Set(0),
        in_stock: Set(payload.in_stock.unwrap_or(true)),
        image_url: Set(optional_text(payload.image_url)),
        description: Set(optional_text(payload.description)),
        created_at: NotSet,
    };
    let item = item.insert(state.db()).await?;

    audit::record(
        state.db(),
        Some(user.user_id),
        "menu_item_create",
        "menu_items",
        serde_json::json!({ "menu_item_id": item.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Menu item created",
        menu_item_from_entity(item),
        Some(Meta::empty()),
    ))
}

pub async fn update_menu_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateMenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    ensure_admin(user)?;
    let existing = MenuItems::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: MenuItemActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(require_text(&name, "name")?);
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
        active.price = Set(price);
    }
    if let Some(category_id) = payload.category_id {
        ensure_category(state, category_id).await?;
        active.category_id = Set(category_id);
    }
    if let Some(in_stock) = payload.in_stock {
        active.in_stock = Set(in_stock);
    }
    if payload.image_url.is_some() {
        active.image_url = Set(optional_text(payload.image_url));
    }
    if payload.description.is_some() {
        active.description = Set(optional_text(payload.description));
    }

    let item = active.update(state.db()).await?;

    audit::record(
        state.db(),
        Some(user.user_id),
        "menu_item_update",
        "menu_items",
        serde_json::json!({ "menu_item_id": item.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        menu_item_from_entity(item),
        Some(Meta::empty()),
    ))
}

pub async fn set_stock(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    in_stock: bool,
) -> AppResult<ApiResponse<MenuItem>> {
    ensure_admin(user)?;
    let existing = MenuItems::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: MenuItemActive = existing.into();
    active.in_stock = Set(in_stock);
    let item = active.update(state.db()).await?;
    tracing::info!(menu_item_id = %item.id, in_stock, "menu item stock changed");

    Ok(ApiResponse::success(
        "Stock updated",
        menu_item_from_entity(item),
        Some(Meta::empty()),
    ))
}

/// Deletes a menu item unless an order still references it. Cart lines
/// holding the item go with it.
pub async fn delete_menu_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let referenced = OrderItems::find()
        .filter(OrderItemCol::MenuItemId.eq(id))
        .one(state.db())
        .await?;
    if referenced.is_some() {
        return Err(AppError::Conflict(
            "menu item is referenced by existing orders".to_string(),
        ));
    }

    let result = MenuItems::delete_by_id(id).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state.db(),
        Some(user.user_id),
        "menu_item_delete",
        "menu_items",
        serde_json::json!({ "menu_item_id": id }),
    )
    .await;

    Ok(ApiResponse::done("Deleted"))
}

pub async fn popular_items(
    state: &AppState,
    limit: Option<u64>,
) -> AppResult<ApiResponse<MenuItemList>> {
    let limit = limit
        .unwrap_or(DEFAULT_POPULAR_LIMIT)
        .clamp(1, MAX_POPULAR_LIMIT);
    let items = top_menu_items(state, limit).await?;
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success("Popular", MenuItemList { items }, Some(meta)))
}

pub(crate) async fn top_menu_items(state: &AppState, limit: u64) -> AppResult<Vec<MenuItem>> {
    let items = MenuItems::find()
        .filter(MenuCol::OrderCount.gt(0))
        .order_by_desc(MenuCol::OrderCount)
        .order_by_asc(MenuCol::Name)
        .limit(limit)
        .all(state.db())
        .await?
        .into_iter()
        .map(menu_item_from_entity)
        .collect();
    Ok(items)
}

async fn ensure_category_name_free(
    state: &AppState,
    name: &str,
    except: Option<Uuid>,
) -> AppResult<()> {
    let taken = Categories::find()
        .filter(CategoryCol::Name.eq(name))
        .one(state.db())
        .await?;
    match taken {
        Some(c) if Some(c.id) != except => {
            Err(AppError::Conflict(format!("category {name} already exists")))
        }
        _ => Ok(()),
    }
}

async fn ensure_category(state: &AppState, id: Uuid) -> AppResult<()> {
    let category = Categories::find_by_id(id).one(state.db()).await?;
    if category.is_none() {
        return Err(AppError::BadRequest("category not found".to_string()));
    }
    Ok(())
}

fn validate_price(price: i64) -> AppResult<()> {
    if price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    Ok(())
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub(crate) fn menu_item_from_entity(model: MenuItemModel) -> MenuItem {
    MenuItem {
        id: model.id,
        name: model.name,
        price: model.price,
        category_id: model.category_id,
        order_count: model.order_count,
        in_stock: model.in_stock,
        image_url: model.image_url,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
