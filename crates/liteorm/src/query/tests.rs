//! Statement construction and binding-order tests.

use crate::config::{DatabaseConfig, Dialect};
use crate::manager::DatabaseManager;
use crate::query::{record, Builder, JoinClause, JoinType, Lock, Operand, Record};
use crate::value::{raw, Value};

fn db() -> DatabaseManager {
    DatabaseManager::new(DatabaseConfig::new())
}

fn base_db() -> DatabaseManager {
    DatabaseManager::new(DatabaseConfig::new().dialect(Dialect::Base))
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|v| Value::Int(*v)).collect()
}

/// Compile and check that every placeholder has exactly one binding.
fn sql_of(query: &Builder) -> String {
    let sql = query.to_sql().unwrap();
    assert_eq!(
        sql.matches('?').count(),
        query.get_bindings().len(),
        "placeholder/binding mismatch in `{sql}`"
    );
    sql
}

// ==================== Columns / FROM ====================

#[test]
fn test_select_all_by_default() {
    let q = db().table("users");
    assert_eq!(sql_of(&q), "SELECT * FROM `users`");
}

#[test]
fn test_select_columns_and_distinct() {
    let q = db().table("users").select(["id", "users.name as n"]).distinct();
    assert_eq!(
        sql_of(&q),
        "SELECT DISTINCT `id`, `users`.`name` AS `n` FROM `users`"
    );
}

#[test]
fn test_columns_accessor_alongside_get_columns() {
    let q = db().table("users").select(["id", "name"]);
    assert_eq!(q.columns(), &[crate::ident::Ident::name("id"), crate::ident::Ident::name("name")]);
    assert!(db().table("users").columns().is_empty());
}

#[test]
fn test_select_raw_binds_into_select() {
    let q = db()
        .table("users")
        .select(["id"])
        .select_raw("price * ? AS taxed", vec![Value::Float(1.2)]);
    assert_eq!(sql_of(&q), "SELECT `id`, price * ? AS taxed FROM `users`");
    assert_eq!(q.get_bindings(), vec![Value::Float(1.2)]);
}

#[test]
fn test_select_sub() {
    let db = db();
    let orders = db
        .table("orders")
        .aggregate("count", ["*"])
        .unwrap()
        .where_("total", ">", 10)
        .unwrap();
    let q = db
        .table("users")
        .select(["id"])
        .select_sub(orders, "order_count")
        .unwrap();
    assert_eq!(
        sql_of(&q),
        "SELECT `id`, (SELECT COUNT(*) AS aggregate FROM `orders` WHERE `total` > ?) AS `order_count` FROM `users`"
    );
    assert_eq!(q.get_bindings(), ints(&[10]));
}

#[test]
fn test_select_sub_rejects_blank_sql() {
    let err = db().table("users").select_sub("  ", "x").unwrap_err();
    assert!(err.is_construction());
}

#[test]
fn test_raw_table() {
    let q = db().query().from(raw("(SELECT 1) AS t"));
    assert_eq!(sql_of(&q), "SELECT * FROM (SELECT 1) AS t");
}

// ==================== WHERE ====================

#[test]
fn test_basic_where() {
    let q = db()
        .table("users")
        .where_("votes", ">", 100)
        .unwrap()
        .or_where_eq("name", "John")
        .unwrap();
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` WHERE `votes` > ? OR `name` = ?"
    );
    assert_eq!(q.get_bindings(), vec![Value::Int(100), Value::from("John")]);
}

#[test]
fn test_operator_case_is_preserved() {
    let q = db().table("users").where_("name", "LIKE", "J%").unwrap();
    assert_eq!(sql_of(&q), "SELECT * FROM `users` WHERE `name` LIKE ?");
}

#[test]
fn test_unknown_operator_becomes_value() {
    let q = db().table("users").where_("name", "alice", "ignored").unwrap();
    assert_eq!(sql_of(&q), "SELECT * FROM `users` WHERE `name` = ?");
    assert_eq!(q.get_bindings(), vec![Value::from("alice")]);
}

#[test]
fn test_map_where() {
    let q = db()
        .table("users")
        .where_map([("a", 1), ("b", 2)])
        .unwrap();
    assert_eq!(sql_of(&q), "SELECT * FROM `users` WHERE `a` = ? AND `b` = ?");
    assert_eq!(q.get_bindings(), ints(&[1, 2]));
}

#[test]
fn test_json_map_where() {
    let map = serde_json::json!({ "status": "active", "age": 30 });
    let serde_json::Value::Object(map) = map else {
        unreachable!()
    };
    let q = db()
        .table("users")
        .where_cond(map, Default::default())
        .unwrap();
    assert_eq!(q.get_bindings().len(), 2);
    assert!(sql_of(&q).starts_with("SELECT * FROM `users` WHERE `"));
}

#[test]
fn test_json_array_through_where_is_unsupported() {
    let err = db()
        .table("t")
        .where_("id", "=", serde_json::json!([1, 2]))
        .unwrap_err();
    assert!(err.is_unsupported());

    let err = db()
        .table("t")
        .where_eq("id", serde_json::json!([]))
        .unwrap_err();
    assert!(err.is_unsupported());
}

#[test]
fn test_json_map_with_array_value_is_unsupported() {
    let serde_json::Value::Object(map) = serde_json::json!({ "status": "active", "id": [1, 2] })
    else {
        unreachable!()
    };
    let err = db()
        .table("users")
        .where_cond(map, Default::default())
        .unwrap_err();
    assert!(err.is_unsupported());
}

#[test]
fn test_json_scalar_and_object_values_bind_as_values() {
    let q = db()
        .table("t")
        .where_eq("n", serde_json::json!(3))
        .unwrap()
        .where_eq("doc", serde_json::json!({ "k": 1 }))
        .unwrap();
    assert_eq!(sql_of(&q), "SELECT * FROM `t` WHERE `n` = ? AND `doc` = ?");
    assert_eq!(
        q.get_bindings(),
        vec![Value::Int(3), Value::from(r#"{"k":1}"#)]
    );
}

#[test]
fn test_null_value_coerces_to_is_null() {
    let q = db()
        .table("users")
        .where_("deleted_at", "=", Value::Null)
        .unwrap()
        .where_("banned_at", "<>", None::<i64>)
        .unwrap();
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` WHERE `deleted_at` IS NULL AND `banned_at` IS NOT NULL"
    );
    assert!(q.get_bindings().is_empty());
}

#[test]
fn test_two_argument_null_matches_where_null() {
    let db = db();
    let a = db.table("t").where_eq("x", Value::Null).unwrap();
    let b = db.table("t").where_null("x");
    assert_eq!(sql_of(&a), "SELECT * FROM `t` WHERE `x` IS NULL");
    assert_eq!(a.to_sql().unwrap(), b.to_sql().unwrap());
    assert!(a.get_bindings().is_empty());
}

#[test]
fn test_null_with_comparison_operator_is_rejected() {
    let err = db()
        .table("users")
        .where_("age", ">", Value::Null)
        .unwrap_err();
    assert!(err.is_construction());
}

#[test]
fn test_list_through_where_is_unsupported() {
    let err = db()
        .table("users")
        .where_("id", "=", vec![Value::Int(1), Value::Int(2)])
        .unwrap_err();
    assert!(err.is_unsupported());
}

#[test]
fn test_tuple_group() {
    let q = db()
        .table("t")
        .where_all(vec![
            vec!["a".into(), "=".into(), 1i64.into()],
            vec!["b".into(), ">".into(), 2i64.into()],
        ])
        .unwrap();
    assert_eq!(sql_of(&q), "SELECT * FROM `t` WHERE (`a` = ? AND `b` > ?)");
    assert_eq!(q.get_bindings(), ints(&[1, 2]));
}

#[test]
fn test_tuple_group_rejects_bad_shape() {
    let err = db()
        .table("t")
        .where_all(vec![vec![Operand::from("a"), Operand::from(1)]])
        .unwrap_err();
    assert!(err.is_construction());

    let err = db()
        .table("t")
        .where_all(vec![vec![Operand::from(1), Operand::from("="), Operand::from(1)]])
        .unwrap_err();
    assert!(err.is_construction());
}

#[test]
fn test_nested_group() {
    let db = db();
    let group = db
        .query()
        .where_("b", "=", 2)
        .unwrap()
        .or_where("c", "=", 3)
        .unwrap();
    let q = db
        .table("t")
        .where_("a", "=", 1)
        .unwrap()
        .where_nested(group)
        .where_("d", "=", 4)
        .unwrap();
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `t` WHERE `a` = ? AND (`b` = ? OR `c` = ?) AND `d` = ?"
    );
    assert_eq!(q.get_bindings(), ints(&[1, 2, 3, 4]));
}

#[test]
fn test_nested_group_without_wheres_is_ignored() {
    let db = db();
    let q = db.table("t").or_where_nested(db.query());
    assert_eq!(sql_of(&q), "SELECT * FROM `t`");
}

#[test]
fn test_nested_takes_parent_table() {
    let db = db();
    let q = db.table("t").where_cond(db.query().where_null("x"), Default::default()).unwrap();
    match &q.get_wheres()[0] {
        crate::query::Predicate::Nested { query, .. } => {
            assert_eq!(query.get_from(), q.get_from());
        }
        other => panic!("expected nested predicate, got {other:?}"),
    }
}

#[test]
fn test_where_in_list_and_empty() {
    let q = db()
        .table("users")
        .where_in("id", [1, 2, 3])
        .where_in("role", Vec::<i64>::new())
        .or_where_not_in("team", Vec::<i64>::new());
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` WHERE `id` IN (?, ?, ?) AND 0 = 1 OR 1 = 1"
    );
    assert_eq!(q.get_bindings(), ints(&[1, 2, 3]));
}

#[test]
fn test_where_in_subquery() {
    let db = db();
    let sub = db
        .table("orders")
        .select(["user_id"])
        .where_("total", ">", 50)
        .unwrap();
    let q = db.table("users").where_in("id", sub);
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` WHERE `id` IN (SELECT `user_id` FROM `orders` WHERE `total` > ?)"
    );
    assert_eq!(q.get_bindings(), ints(&[50]));
}

#[test]
fn test_where_not_in_subquery() {
    let db = db();
    let sub = db.table("bans").select(["user_id"]);
    let q = db.table("users").where_not_in("id", sub);
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` WHERE `id` NOT IN (SELECT `user_id` FROM `bans`)"
    );
}

#[test]
fn test_where_sub_comparison() {
    let db = db();
    let sub = db
        .table("orders")
        .aggregate("max", ["total"])
        .unwrap()
        .where_("status", "=", "paid")
        .unwrap();
    let q = db.table("orders").where_("total", "=", sub).unwrap();
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `orders` WHERE `total` = (SELECT MAX(`total`) AS aggregate FROM `orders` WHERE `status` = ?)"
    );
}

#[test]
fn test_between() {
    let q = db()
        .table("users")
        .where_between("age", 18, 30)
        .or_where_not_between("score", 1, 2);
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` WHERE `age` BETWEEN ? AND ? OR `score` NOT BETWEEN ? AND ?"
    );
    assert_eq!(q.get_bindings(), ints(&[18, 30, 1, 2]));
}

#[test]
fn test_exists() {
    let db = db();
    let sub = db.table("orders").where_raw("orders.user_id = users.id", vec![]);
    let q = db
        .table("users")
        .where_exists(sub.clone())
        .or_where_not_exists(sub.where_("total", ">", 5).unwrap());
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` WHERE EXISTS (SELECT * FROM `orders` WHERE orders.user_id = users.id) \
         OR NOT EXISTS (SELECT * FROM `orders` WHERE orders.user_id = users.id AND `total` > ?)"
    );
    assert_eq!(q.get_bindings(), ints(&[5]));
}

#[test]
fn test_where_raw_and_null() {
    let q = db()
        .table("users")
        .where_raw("age > ? AND age < ?", ints(&[1, 9]))
        .or_where_null("deleted_at")
        .where_not_null("email");
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` WHERE age > ? AND age < ? OR `deleted_at` IS NULL AND `email` IS NOT NULL"
    );
}

#[test]
fn test_raw_value_rendered_inline() {
    let q = db()
        .table("events")
        .where_("at", "<", raw("CURRENT_TIMESTAMP"))
        .unwrap();
    assert_eq!(sql_of(&q), "SELECT * FROM `events` WHERE `at` < CURRENT_TIMESTAMP");
    assert!(q.get_bindings().is_empty());
}

// ==================== JOIN ====================

#[test]
fn test_join_columns() {
    let q = db()
        .table("users")
        .join("contacts", "users.id", "=", "contacts.user_id")
        .unwrap()
        .left_join("orders", "users.id", "=", "orders.user_id")
        .unwrap();
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` INNER JOIN `contacts` ON `users`.`id` = `contacts`.`user_id` \
         LEFT JOIN `orders` ON `users`.`id` = `orders`.`user_id`"
    );
}

#[test]
fn test_join_where_binds_into_join() {
    let q = db()
        .table("users")
        .where_("active", "=", true)
        .unwrap()
        .right_join_where("roles", "roles.name", "=", "admin")
        .unwrap();
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` RIGHT JOIN `roles` ON `roles`.`name` = ? WHERE `active` = ?"
    );
    assert_eq!(q.get_bindings(), vec![Value::from("admin"), Value::Bool(true)]);
}

#[test]
fn test_join_requires_first_column() {
    let err = db()
        .table("users")
        .join("contacts", "", "=", "contacts.user_id")
        .unwrap_err();
    assert!(err.is_construction());
}

#[test]
fn test_prebuilt_join_clause() {
    let clause = JoinClause::new("contacts", JoinType::Inner)
        .on("users.id", "=", "contacts.user_id")
        .or_on("users.alt_id", "=", "contacts.user_id")
        .where_("contacts.kind", "=", "email")
        .where_null("contacts.deleted_at");
    let q = db().table("users").left_join_clause(clause);
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` LEFT JOIN `contacts` ON `users`.`id` = `contacts`.`user_id` \
         OR `users`.`alt_id` = `contacts`.`user_id` AND `contacts`.`kind` = ? \
         AND `contacts`.`deleted_at` IS NULL"
    );
    assert_eq!(q.get_bindings(), vec![Value::from("email")]);
}

// ==================== GROUP / HAVING / ORDER / LIMIT ====================

#[test]
fn test_group_and_having() {
    let q = db()
        .table("orders")
        .select(["user_id"])
        .group_by(["user_id"])
        .having("total", ">", 100)
        .or_having_raw("COUNT(*) > ?", ints(&[3]));
    assert_eq!(
        sql_of(&q),
        "SELECT `user_id` FROM `orders` GROUP BY `user_id` HAVING `total` > ? OR COUNT(*) > ?"
    );
    assert_eq!(q.get_bindings(), ints(&[100, 3]));
}

#[test]
fn test_order_and_pagination() {
    let q = db()
        .table("users")
        .order_by("name", "asc")
        .latest("created_at")
        .for_page(3, 15);
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `users` ORDER BY `name` ASC, `created_at` DESC LIMIT 15 OFFSET 30"
    );
}

#[test]
fn test_non_positive_limit_and_offset_are_omitted() {
    let q = db().table("users").limit(0).offset(-5);
    assert_eq!(q.get_offset(), Some(0));
    assert_eq!(sql_of(&q), "SELECT * FROM `users`");
}

#[test]
fn test_raw_order_is_unsupported_at_compile() {
    let q = db().table("users").order_by_raw("RANDOM()", vec![]);
    assert!(q.to_sql().unwrap_err().is_unsupported());
}

// ==================== UNION ====================

#[test]
fn test_union_routes_order_and_limit() {
    let db = db();
    let q = db
        .table("a")
        .order_by("id", "asc")
        .union(db.table("b").where_("x", "=", 1).unwrap())
        .order_by("id", "desc")
        .limit(5)
        .offset(10);
    assert_eq!(
        sql_of(&q),
        "SELECT * FROM `a` ORDER BY `id` ASC UNION SELECT * FROM `b` WHERE `x` = ? \
         ORDER BY `id` DESC LIMIT 5 OFFSET 10"
    );
    assert_eq!(q.get_limit(), None);
}

#[test]
fn test_union_all() {
    let db = db();
    let q = db.table("a").union_all(db.table("b"));
    assert_eq!(sql_of(&q), "SELECT * FROM `a` UNION ALL SELECT * FROM `b`");
}

// ==================== Aggregate / lock ====================

#[test]
fn test_aggregate_replaces_columns() {
    let q = db()
        .table("users")
        .select(["id"])
        .aggregate("count", ["*"])
        .unwrap();
    assert_eq!(sql_of(&q), "SELECT COUNT(*) AS aggregate FROM `users`");
}

#[test]
fn test_aggregate_distinct_column() {
    let q = db()
        .table("users")
        .distinct()
        .aggregate("count", ["email"])
        .unwrap();
    assert_eq!(
        sql_of(&q),
        "SELECT COUNT(DISTINCT `email`) AS aggregate FROM `users`"
    );
}

#[test]
fn test_unknown_aggregate_is_rejected() {
    let err = db().table("users").aggregate("median", ["age"]).unwrap_err();
    assert!(err.is_construction());
}

#[test]
fn test_lock_per_dialect() {
    let q = base_db().table("users").where_("id", "=", 1).unwrap().lock_for_update();
    assert_eq!(sql_of(&q), "SELECT * FROM `users` WHERE `id` = ? FOR UPDATE");

    let q = base_db().table("users").shared_lock();
    assert_eq!(sql_of(&q), "SELECT * FROM `users` LOCK IN SHARE MODE");

    let q = db().table("users").lock(Lock::Update);
    assert_eq!(sql_of(&q), "SELECT * FROM `users`");
}

// ==================== Binding order ====================

#[test]
fn test_bindings_follow_clause_order_not_call_order() {
    let db = db();
    let q = db
        .table("users")
        .union(db.table("admins").where_("level", "=", 6).unwrap())
        .having("total", ">", 5)
        .where_("votes", ">", 4)
        .unwrap()
        .join_where("roles", "roles.user_id", "=", 3)
        .unwrap()
        .select_raw("? AS flag", ints(&[1]))
        .group_by(["role"]);
    assert_eq!(
        sql_of(&q),
        "SELECT ? AS flag FROM `users` INNER JOIN `roles` ON `roles`.`user_id` = ? \
         WHERE `votes` > ? GROUP BY `role` HAVING `total` > ? \
         UNION SELECT * FROM `admins` WHERE `level` = ?"
    );
    assert_eq!(q.get_bindings(), ints(&[1, 3, 4, 5, 6]));
}

#[test]
fn test_compile_is_idempotent() {
    let q = db()
        .table("users")
        .where_("a", "=", 1)
        .unwrap()
        .join("b", "b.id", "=", "users.b_id")
        .unwrap();
    let first = q.to_sql().unwrap();
    let bindings = q.get_bindings();
    assert_eq!(q.to_sql().unwrap(), first);
    assert_eq!(q.get_bindings(), bindings);
}

#[test]
fn test_manual_binding_helpers() {
    use crate::query::BindingKind;

    let q = db()
        .table("users")
        .where_raw("a = ?", ints(&[1]))
        .add_binding(2, BindingKind::Where)
        .set_bindings(ints(&[9]), BindingKind::Select);
    assert_eq!(q.raw_bindings().get(BindingKind::Where), &ints(&[1, 2])[..]);
    assert_eq!(q.get_bindings(), ints(&[9, 1, 2]));
    assert_eq!(
        Builder::clean_bindings(vec![Value::Int(1), Value::Raw(raw("NOW()"))]),
        ints(&[1])
    );
}

// ==================== Merge ====================

#[test]
fn test_merge() {
    let db = db();
    let other = db
        .query()
        .select(["id", "email"])
        .where_("b", "=", 2)
        .unwrap()
        .limit(3);
    let q = db
        .table("users")
        .select(["id"])
        .where_("a", "=", 1)
        .unwrap()
        .limit(10)
        .offset(5)
        .merge(other);
    assert_eq!(
        sql_of(&q),
        "SELECT `id`, `email` FROM `users` WHERE `a` = ? AND `b` = ? LIMIT 3 OFFSET 5"
    );
    assert_eq!(q.get_bindings(), ints(&[1, 2]));
}

// ==================== Writes ====================

#[test]
fn test_insert_multiple_rows_sorted() {
    let built = db()
        .table("users")
        .to_insert_sql(vec![
            record([("b", 2), ("a", 1)]),
            record([("a", 3), ("b", 4)]),
        ])
        .unwrap()
        .unwrap();
    assert_eq!(
        built.sql,
        "INSERT INTO `users` (`a`, `b`) VALUES (?, ?), (?, ?)"
    );
    assert_eq!(built.bindings, ints(&[1, 2, 3, 4]));
}

#[test]
fn test_insert_raw_value_inline() {
    let mut row = record([("name", "x")]);
    row.insert("created_at".to_string(), Value::Raw(raw("CURRENT_TIMESTAMP")));
    let built = db().table("users").to_insert_sql(row).unwrap().unwrap();
    assert_eq!(
        built.sql,
        "INSERT INTO `users` (`created_at`, `name`) VALUES (CURRENT_TIMESTAMP, ?)"
    );
    assert_eq!(built.bindings, vec![Value::from("x")]);
}

#[test]
fn test_insert_shapes() {
    let db = db();
    assert!(db
        .table("users")
        .to_insert_sql(Vec::<Record>::new())
        .unwrap()
        .is_none());

    let err = db
        .table("users")
        .to_insert_sql(vec![record([("a", 1)]), record([("b", 2)])])
        .unwrap_err();
    assert!(err.is_construction());

    assert!(db
        .table("users")
        .to_insert_sql(Record::new())
        .unwrap()
        .is_none());

    let err = db
        .table("users")
        .to_insert_sql(vec![Record::new(), record([("a", 1)])])
        .unwrap_err();
    assert!(err.is_construction());

    let err = db.query().to_insert_sql(record([("a", 1)])).unwrap_err();
    assert!(err.is_compilation());
}

#[test]
fn test_update() {
    let built = db()
        .table("users")
        .where_("id", "=", 1)
        .unwrap()
        .to_update_sql(record([("votes", Value::Int(2)), ("name", Value::from("x"))]))
        .unwrap();
    assert_eq!(
        built.sql,
        "UPDATE `users` SET `name` = ?, `votes` = ? WHERE `id` = ?"
    );
    assert_eq!(built.bindings, vec![Value::from("x"), Value::Int(2), Value::Int(1)]);
}

#[test]
fn test_update_with_join() {
    let built = db()
        .table("users")
        .join_where("roles", "roles.user_id", "=", 7)
        .unwrap()
        .where_("users.id", "=", 1)
        .unwrap()
        .to_update_sql(record([("votes", 2)]))
        .unwrap();
    assert_eq!(
        built.sql,
        "UPDATE `users` INNER JOIN `roles` ON `roles`.`user_id` = ? SET `votes` = ? WHERE `users`.`id` = ?"
    );
    assert_eq!(built.bindings, ints(&[7, 2, 1]));
}

#[test]
fn test_delete() {
    let built = db()
        .table("users")
        .where_("id", "=", 1)
        .unwrap()
        .to_delete_sql()
        .unwrap();
    assert_eq!(built.sql, "DELETE FROM `users` WHERE `id` = ?");
    assert_eq!(built.bindings, ints(&[1]));

    let built = db().table("users").to_delete_sql().unwrap();
    assert_eq!(built.sql, "DELETE FROM `users`");
}

#[test]
fn test_truncate_per_dialect() {
    let statements = db().table("users").to_truncate_sql().unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].sql, "DELETE FROM sqlite_sequence WHERE name = ?");
    assert_eq!(statements[0].bindings, vec![Value::from("users")]);
    assert_eq!(statements[1].sql, "DELETE FROM `users`");
    assert!(statements[1].bindings.is_empty());

    let statements = base_db().table("users").to_truncate_sql().unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].sql, "TRUNCATE `users`");
}

// ==================== Config ====================

#[test]
fn test_table_prefix() {
    let db = DatabaseManager::new(DatabaseConfig::new().table_prefix("app_"));
    let q = db
        .table("users as u")
        .select(["u.id"])
        .join("posts", "u.id", "=", "posts.user_id")
        .unwrap();
    assert_eq!(
        sql_of(&q),
        "SELECT `u`.`id` FROM `app_users` AS `app_u` INNER JOIN `app_posts` ON `u`.`id` = `posts`.`user_id`"
    );

    let statements = db.table("users").to_truncate_sql().unwrap();
    assert_eq!(statements[0].bindings, vec![Value::from("app_users")]);
}

#[test]
fn test_custom_marker() {
    let db = DatabaseManager::new(DatabaseConfig::new().marker("%s"));
    let q = db.table("users").where_("id", "=", 1).unwrap();
    assert_eq!(q.to_sql().unwrap(), "SELECT * FROM `users` WHERE `id` = %s");
}

#[test]
fn test_new_query_shares_grammar() {
    let db = DatabaseManager::new(DatabaseConfig::new().table_prefix("p_"));
    let q = db.table("users");
    let fresh = q.new_query().from("posts");
    assert_eq!(fresh.to_sql().unwrap(), "SELECT * FROM `p_posts`");
    assert_eq!(q.for_nested_where().get_from(), q.get_from());
}
