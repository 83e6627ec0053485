//! End-to-end tests: fluent chains evaluated against an in-memory store.
//!
//! The fixture is four users; `zhaoliu` has no real name, which exercises the
//! null semantics of every negated operator.

use filtra::{columns, record, Condition, Conditions, MemoryStore, Predicate, Value};
use pretty_assertions::assert_eq;

fn users() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.extend([
        record! { "id" => 1, "username" => "zhangsan", "realname" => "张三" },
        record! { "id" => 2, "username" => "lisi", "realname" => "李四" },
        record! { "id" => 3, "username" => "wangwu", "realname" => "王五" },
        record! { "id" => 4, "username" => "zhaoliu", "realname" => Value::Null },
    ]);
    store
}

fn ids(store: &MemoryStore, spec: &Predicate) -> Vec<i64> {
    store
        .find(spec)
        .iter()
        .filter_map(|row| match row.get("id") {
            Some(Value::Int(id)) => Some(*id),
            _ => None,
        })
        .collect()
}

#[test]
fn test_neutral_chain_matches_everything() {
    let store = users();
    let spec = Conditions::query().to_spec();
    assert_eq!(store.count(&spec), 4);
}

#[test]
fn test_eq() {
    let store = users();
    let spec = Conditions::query().eq("id", 1).unwrap().to_spec();
    assert_eq!(ids(&store, &spec), vec![1]);
}

#[test]
fn test_eq_empty_string_matches_nothing() {
    let store = users();
    let spec = Conditions::query().eq("username", "").unwrap().to_spec();
    assert_eq!(store.count(&spec), 0);
}

#[test]
fn test_eq_null_is_noop() {
    let store = users();
    let spec = Conditions::query()
        .eq("realname", None::<&str>)
        .unwrap()
        .to_spec();
    assert_eq!(store.count(&spec), 4);
}

#[test]
fn test_and_chain() {
    let store = users();
    let spec = Conditions::query()
        .eq("username", "lisi")
        .unwrap()
        .eq("realname", "李四")
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![2]);
}

#[test]
fn test_or_is_sticky() {
    let store = users();
    // id = 1 OR id = 2 OR id = 3; one or() covers both later merges.
    let spec = Conditions::query()
        .eq("id", 1)
        .unwrap()
        .or()
        .eq("id", 2)
        .unwrap()
        .eq("id", 3)
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 2, 3]);
}

#[test]
fn test_or_pair() {
    let store = users();
    let spec = Conditions::query()
        .eq("id", 1)
        .unwrap()
        .or()
        .eq("id", 2)
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 2]);
}

#[test]
fn test_or_then_and() {
    let store = users();
    // (username = 'lisi' OR username = 'wangwu') AND id >= 3
    let spec = Conditions::query()
        .eq("username", "lisi")
        .unwrap()
        .or()
        .eq("username", "wangwu")
        .unwrap()
        .and_group(|g| g.ge("id", 3))
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![3]);
}

#[test]
fn test_or_group() {
    let store = users();
    // id = 2 OR (username = 'zhangsan')
    let spec = Conditions::query()
        .eq("id", 2)
        .unwrap()
        .or_group(|g| g.eq("username", "zhangsan"))
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 2]);
}

#[test]
fn test_and_group_excludes() {
    let store = users();
    // id = 2 AND (username = 'zhangsan')
    let spec = Conditions::query()
        .eq("id", 2)
        .unwrap()
        .and_group(|g| g.eq("username", "zhangsan"))
        .unwrap()
        .to_spec();
    assert_eq!(store.count(&spec), 0);
}

#[test]
fn test_or_group_with_inner_or() {
    let store = users();
    // id = 1 OR (id = 2 OR id = 3)
    let spec = Conditions::query()
        .eq("id", 1)
        .unwrap()
        .or_group(|g| g.eq("id", 2)?.or().eq("id", 3))
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 2, 3]);
}

#[test]
fn test_group_does_not_change_running_mode() {
    let store = users();
    // (id = 1 OR id = 2) AND id = 3: the or_group merges with OR but the
    // running mode stays AND for the trailing leaf.
    let spec = Conditions::query()
        .eq("id", 1)
        .unwrap()
        .or_group(|g| g.eq("id", 2))
        .unwrap()
        .eq("id", 3)
        .unwrap()
        .to_spec();
    assert_eq!(store.count(&spec), 0);

    // An explicit or() after the group is what extends the disjunction.
    let spec = Conditions::query()
        .eq("id", 1)
        .unwrap()
        .or_group(|g| g.eq("id", 2))
        .unwrap()
        .or()
        .eq("id", 3)
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 2, 3]);
}

#[test]
fn test_like_family() {
    let store = users();

    let spec = Conditions::query()
        .right_like("username", "lis")
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![2]);

    let spec = Conditions::query()
        .left_like("username", "isi")
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![2]);

    let spec = Conditions::query()
        .all_like("username", "is")
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![2]);

    let spec = Conditions::query()
        .all_like("realname", "张")
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1]);
}

#[test]
fn test_like_empty_pattern_matches_all_strings() {
    let store = users();
    let spec = Conditions::query()
        .all_like("username", "")
        .unwrap()
        .to_spec();
    assert_eq!(store.count(&spec), 4);
}

#[test]
fn test_like_null_is_noop() {
    let store = users();
    let spec = Conditions::query()
        .all_like("username", None::<&str>)
        .unwrap()
        .to_spec();
    assert_eq!(store.count(&spec), 4);
}

#[test]
fn test_membership() {
    let store = users();

    let spec = Conditions::query().is_in("id", [1, 2]).unwrap().to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 2]);

    let spec = Conditions::query().not_in("id", [1, 2]).unwrap().to_spec();
    assert_eq!(ids(&store, &spec), vec![3, 4]);
}

#[test]
fn test_membership_drops_null_members() {
    let store = users();

    let spec = Conditions::query()
        .is_in("id", [None, Some(1)])
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1]);

    let spec = Conditions::query()
        .is_in("realname", [Some("李四"), None])
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![2]);
}

#[test]
fn test_not_in_skips_null_field_values() {
    let store = users();
    // zhaoliu's realname is NULL, so NOT IN cannot claim it either.
    let spec = Conditions::query()
        .not_in("realname", ["李四"])
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 3]);
}

#[test]
fn test_empty_membership_is_an_error() {
    assert!(Conditions::query().is_in("id", Vec::<i64>::new()).is_err());
    assert!(Conditions::query().not_in("id", Vec::<i64>::new()).is_err());
    assert!(
        Conditions::query()
            .is_in("id", vec![None::<i64>, None::<i64>])
            .is_err()
    );
}

#[test]
fn test_comparisons() {
    let store = users();

    let spec = Conditions::query().ge("id", 1).unwrap().to_spec();
    assert_eq!(store.count(&spec), 4);

    let spec = Conditions::query().le("id", 1).unwrap().to_spec();
    assert_eq!(store.count(&spec), 1);

    let spec = Conditions::query().lt("id", 1).unwrap().to_spec();
    assert_eq!(store.count(&spec), 0);

    let spec = Conditions::query().gt("id", 1).unwrap().to_spec();
    assert_eq!(store.count(&spec), 3);

    let spec = Conditions::query().not_eq("id", 1).unwrap().to_spec();
    assert_eq!(store.count(&spec), 3);
}

#[test]
fn test_between() {
    let store = users();

    let spec = Conditions::query().between("id", 1, 3).unwrap().to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 2, 3]);

    let spec = Conditions::query()
        .not_between("id", 1, 3)
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![4]);

    let spec = Conditions::query().between("id", 2, 4).unwrap().to_spec();
    assert_eq!(ids(&store, &spec), vec![2, 3, 4]);

    let spec = Conditions::query()
        .not_between("id", 2, 3)
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 4]);
}

#[test]
fn test_between_one_sided() {
    let store = users();
    let spec = Conditions::query()
        .between("id", 3, None::<i64>)
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![3, 4]);
}

#[test]
fn test_between_both_bounds_null_is_noop() {
    let store = users();
    let spec = Conditions::query()
        .between("id", None::<i64>, None::<i64>)
        .unwrap()
        .to_spec();
    assert_eq!(store.count(&spec), 4);
}

#[test]
fn test_null_checks() {
    let store = users();

    let spec = Conditions::query().is_null("realname").unwrap().to_spec();
    assert_eq!(ids(&store, &spec), vec![4]);

    let spec = Conditions::query()
        .is_not_null("realname")
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 2, 3]);
}

#[test]
fn test_typed_chain_end_to_end() {
    struct User;

    columns!(User {
        ID => "id",
        USERNAME => "username",
        REALNAME => "realname",
    });

    let store = users();
    let spec = Conditions::typed::<User>()
        .eq(User::ID, 1)
        .unwrap()
        .or()
        .eq(User::USERNAME, "lisi")
        .unwrap()
        .eq(User::REALNAME, None::<&str>)
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1, 2]);
}

#[test]
fn test_dotted_path_against_json_fields() {
    let mut store = MemoryStore::new();
    store.insert(record! {
        "id" => 1,
        "address" => serde_json::json!({"city": "Oslo"}),
    });
    store.insert(record! {
        "id" => 2,
        "address" => serde_json::json!({"city": "Bergen"}),
    });

    let spec = Conditions::query()
        .eq("address.city", "Oslo")
        .unwrap()
        .to_spec();
    assert_eq!(ids(&store, &spec), vec![1]);
}

#[test]
fn test_builder_reuse_after_to_spec() {
    let store = users();
    let mut chain = Condition::new();
    chain.eq("id", 1).unwrap();
    let first = chain.to_spec();
    chain.or().eq("id", 2).unwrap();
    let second = chain.to_spec();
    assert_eq!(store.count(&first), 1);
    assert_eq!(store.count(&second), 2);
}

#[test]
fn test_sql_rendering_matches_chain() {
    let spec = Conditions::query()
        .eq("id", 1)
        .unwrap()
        .or()
        .eq("username", "lisi")
        .unwrap()
        .to_spec();
    let (sql, params) = spec.to_sql(0);
    assert_eq!(sql, "(id = $1 OR username = $2)");
    assert_eq!(
        params,
        vec![Value::Int(1), Value::String("lisi".into())]
    );
}

#[test]
fn test_sql_rendering_of_groups() {
    let spec = Conditions::query()
        .eq("id", 2)
        .unwrap()
        .and_group(|g| g.eq("username", "lisi")?.or().eq("username", "wangwu"))
        .unwrap()
        .to_spec();
    let (sql, params) = spec.to_sql(0);
    assert_eq!(
        sql,
        "(id = $1 AND (username = $2 OR username = $3))"
    );
    assert_eq!(params.len(), 3);
}
