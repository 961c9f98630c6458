use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{CheckoutRequest, CreateOrderRequest, OrderList, OrderWithItems},
    entity::{
        cart_items::{Column as CartCol, Entity as CartItems},
        dining_tables::Entity as DiningTables,
        enums::OrderStatus,
        menu_items::{Column as MenuCol, Entity as MenuItems},
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_staff},
    models::{Order, OrderItem},
    pricing::{self, PriceSummary},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::{optional_text, require_positive, require_text},
    state::AppState,
};

/// Who the order is for and how it is paid.
struct OrderHeader {
    table_id: Option<Uuid>,
    customer_name: String,
    customer_phone: Option<String>,
    customer_email: Option<String>,
    payment_method: String,
}

struct Line {
    menu_item_id: Uuid,
    quantity: i32,
    price: i64,
    notes: Option<String>,
}

/// Staff place an order directly, e.g. for a walk-in table.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_staff(user)?;
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Order has no items".into()));
    }

    // Repeated menu items collapse into one line; the key is (order, menu item).
    let mut requested: BTreeMap<Uuid, (i32, Option<String>)> = BTreeMap::new();
    for line in payload.items {
        let quantity = require_positive(line.quantity, "quantity")?;
        let entry = requested.entry(line.menu_item_id).or_insert((0, None));
        entry.0 = pricing::merge_quantity(entry.0, quantity)?;
        if let Some(notes) = optional_text(line.notes) {
            entry.1 = Some(match entry.1.take() {
                Some(previous) => format!("{previous}; {notes}"),
                None => notes,
            });
        }
    }

    let header = OrderHeader {
        table_id: payload.table_id,
        customer_name: payload.customer_name.trim().to_string(),
        customer_phone: optional_text(payload.customer_phone),
        customer_email: optional_text(payload.customer_email),
        payment_method: require_text(&payload.payment_method, "payment_method")?,
    };

    let txn = state.db().begin().await?;

    let prices = in_stock_prices(&txn, requested.keys().copied().collect()).await?;
    let mut lines = Vec::with_capacity(requested.len());
    for (menu_item_id, (quantity, notes)) in requested {
        let price = prices
            .get(&menu_item_id)
            .copied()
            .ok_or_else(|| AppError::BadRequest(format!("menu item {menu_item_id} not found")))?;
        lines.push(Line {
            menu_item_id,
            quantity,
            price,
            notes,
        });
    }

    let (order, items, summary) = place_order(&txn, user, header, lines).await?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, total = order.total_amount, "order placed");
    audit::record(
        state.db(),
        Some(user.user_id),
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        order_with_items(order, items, summary),
        Some(Meta::empty()),
    ))
}

/// Turns the caller's cart into an order and empties the cart.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let header = OrderHeader {
        table_id: payload.table_id,
        customer_name: payload.customer_name.trim().to_string(),
        customer_phone: optional_text(payload.customer_phone),
        customer_email: optional_text(payload.customer_email),
        payment_method: require_text(&payload.payment_method, "payment_method")?,
    };

    let txn = state.db().begin().await?;

    let cart = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .order_by_asc(CartCol::CreatedAt)
        .all(&txn)
        .await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    // Stock is checked now; the price is the one the customer saw in the cart.
    in_stock_prices(&txn, cart.iter().map(|line| line.menu_item_id).collect()).await?;
    let lines = cart
        .into_iter()
        .map(|line| Line {
            menu_item_id: line.menu_item_id,
            quantity: line.quantity,
            price: line.price,
            notes: None,
        })
        .collect();

    let (order, items, summary) = place_order(&txn, user, header, lines).await?;

    CartItems::delete_many()
        .filter(CartCol::UserId.eq(user.user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, total = order.total_amount, "checkout completed");
    audit::record(
        state.db(),
        Some(user.user_id),
        "checkout",
        "orders",
        serde_json::json!({ "order_id": order.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Checkout success",
        order_with_items(order, items, summary),
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if !user.is_staff() {
        condition = condition.add(OrderCol::UserId.eq(user.user_id));
    }
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }
    if let Some(table_id) = query.table_id {
        condition = condition.add(OrderCol::TableId.eq(table_id));
    }
    if let Some(customer) = query.customer.as_ref().map(|c| c.trim()).filter(|c| !c.is_empty()) {
        condition = condition.add(OrderCol::CustomerName.contains(customer));
    }
    if let Some(from) = query.from {
        condition = condition.add(OrderCol::CreatedAt.gte(from));
    }
    if let Some(to) = query.to {
        condition = condition.add(OrderCol::CreatedAt.lte(to));
    }

    let mut finder = Orders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(state.db()).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;
    if !user.is_staff() && order.user_id != user.user_id {
        return Err(AppError::NotFound);
    }

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(state.db())
        .await?;
    let summary = pricing::summarize(items.iter().map(|i| (i.price, i.quantity)))?;

    Ok(ApiResponse::success(
        "OK",
        order_with_items(order, items, summary),
        Some(Meta::empty()),
    ))
}

/// Writes the new status directly; no transition is refused.
pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    status: OrderStatus,
) -> AppResult<ApiResponse<Order>> {
    ensure_staff(user)?;
    let existing = Orders::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = existing.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(state.db()).await?;

    audit::record(
        state.db(),
        Some(user.user_id),
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": order.id, "status": order.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

/// Deletes an order; its items are removed by the foreign key cascade.
pub async fn delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Orders::delete_by_id(id).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state.db(),
        Some(user.user_id),
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": id }),
    )
    .await;

    Ok(ApiResponse::done("Deleted"))
}

/// Every order ever placed, oldest first. Feeds the dashboard.
pub(crate) async fn order_history<C>(conn: &C) -> AppResult<Vec<Order>>
where
    C: ConnectionTrait,
{
    let orders = Orders::find()
        .order_by_asc(OrderCol::CreatedAt)
        .all(conn)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();
    Ok(orders)
}

/// Current prices of the given menu items, failing if any is missing or
/// out of stock.
async fn in_stock_prices<C>(conn: &C, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, i64>>
where
    C: ConnectionTrait,
{
    let items = MenuItems::find()
        .filter(MenuCol::Id.is_in(ids.clone()))
        .all(conn)
        .await?;
    let by_id: HashMap<Uuid, _> = items.into_iter().map(|m| (m.id, m)).collect();

    let mut prices = HashMap::with_capacity(ids.len());
    for id in ids {
        let item = by_id
            .get(&id)
            .ok_or_else(|| AppError::BadRequest(format!("menu item {id} not found")))?;
        if !item.in_stock {
            return Err(AppError::BadRequest(format!("{} is out of stock", item.name)));
        }
        prices.insert(id, item.price);
    }
    Ok(prices)
}

async fn place_order<C>(
    conn: &C,
    user: &AuthUser,
    header: OrderHeader,
    lines: Vec<Line>,
) -> AppResult<(OrderModel, Vec<OrderItemModel>, PriceSummary)>
where
    C: ConnectionTrait,
{
    if let Some(table_id) = header.table_id {
        let table = DiningTables::find_by_id(table_id).one(conn).await?;
        if table.is_none() {
            return Err(AppError::BadRequest("table not found".to_string()));
        }
    }

    let summary = pricing::summarize(lines.iter().map(|l| (l.price, l.quantity)))?;
    let now = Utc::now();

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        table_id: Set(header.table_id),
        user_id: Set(user.user_id),
        customer_name: Set(header.customer_name),
        customer_phone: Set(header.customer_phone),
        customer_email: Set(header.customer_email),
        total_amount: Set(summary.total),
        status: Set(OrderStatus::Pending),
        payment_method: Set(header.payment_method),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(conn)
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let item = OrderItemActive {
            order_id: Set(order.id),
            menu_item_id: Set(line.menu_item_id),
            quantity: Set(line.quantity),
            price: Set(line.price),
            notes: Set(line.notes),
        }
        .insert(conn)
        .await?;

        MenuItems::update_many()
            .col_expr(
                MenuCol::OrderCount,
                Expr::col(MenuCol::OrderCount).add(line.quantity),
            )
            .filter(MenuCol::Id.eq(line.menu_item_id))
            .exec(conn)
            .await?;

        items.push(item);
    }

    Ok((order, items, summary))
}

fn order_with_items(
    order: OrderModel,
    items: Vec<OrderItemModel>,
    summary: PriceSummary,
) -> OrderWithItems {
    OrderWithItems {
        order: order_from_entity(order),
        items: items.into_iter().map(order_item_from_entity).collect(),
        summary,
    }
}

pub(crate) fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        table_id: model.table_id,
        user_id: model.user_id,
        customer_name: model.customer_name,
        customer_phone: model.customer_phone,
        customer_email: model.customer_email,
        total_amount: model.total_amount,
        status: model.status,
        payment_method: model.payment_method,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        order_id: model.order_id,
        menu_item_id: model.menu_item_id,
        quantity: model.quantity,
        price: model.price,
        notes: model.notes,
    }
}
