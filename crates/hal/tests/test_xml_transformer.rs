#![cfg(feature = "xml")]

mod common;

use common::{SimplePost, blog_mappings, complex_post};
use helios_hal::mapping::MappingConfig;
use helios_hal::xml::XmlRenderer;
use helios_hal::{
    HalError, HalPagination, HalSerializer, HalTransformer, Mapper, Mapping, media_type,
    to_hal_xml_string,
};
use pretty_assertions::assert_eq;

fn post_transformer() -> HalTransformer {
    HalTransformer::new(Mapper::new().with(Mapping::new("SimplePost", "/post/{postId}", ["postId"])))
}

#[test]
fn test_array_of_objects() {
    let posts = vec![
        SimplePost::new(1, "post title 1", "post body 1", 4),
        SimplePost::new(2, "post title 2", "post body 2", 5),
    ];

    let xml = to_hal_xml_string(&posts, &post_transformer()).expect("serialization succeeds");

    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<resource>
  <total><![CDATA[2]]></total>
  <embedded>
    <resource href="/post/1">
      <post_id><![CDATA[1]]></post_id>
      <title><![CDATA[post title 1]]></title>
      <body><![CDATA[post body 1]]></body>
      <author_id><![CDATA[4]]></author_id>
      <comments/>
      <links>
        <link rel="self" href="/post/1"/>
      </links>
    </resource>
    <resource href="/post/2">
      <post_id><![CDATA[2]]></post_id>
      <title><![CDATA[post title 2]]></title>
      <body><![CDATA[post body 2]]></body>
      <author_id><![CDATA[5]]></author_id>
      <comments/>
      <links>
        <link rel="self" href="/post/2"/>
      </links>
    </resource>
  </embedded>
</resource>"#;
    assert_eq!(xml, expected);
    assert_eq!(media_type(&xml), "application/hal+xml");
}

#[test]
fn test_complex_object() {
    // Comment identifiers are mapped too; a mapped value object in its own
    // identifier field stays in place.
    let mut configs: Vec<MappingConfig> =
        serde_json::from_str(&blog_mappings(true, true)).expect("valid mappings");
    let mut comment_id = configs[2].clone();
    comment_id.class = "CommentId".to_string();
    configs.push(comment_id);

    let mut transformer = HalTransformer::new(Mapper::from_configs(configs).expect("valid mappings"));
    transformer
        .add_meta(
            "author",
            serde_json::json!({"name": "Nil Portugués Calderó", "email": "contact@nilportugues.com"}),
        )
        .add_meta("is_devel", true)
        .set_first_url("http://example.com/posts/1")
        .set_next_url("http://example.com/posts/10");

    let xml = to_hal_xml_string(&complex_post(), &transformer).expect("serialization succeeds");

    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<resource href="http://example.com/posts/9">
  <post_id><![CDATA[9]]></post_id>
  <headline><![CDATA[Hello World]]></headline>
  <body><![CDATA[Your first post]]></body>
  <embedded>
    <resource href="http://example.com/users/1" rel="author">
      <user_id><![CDATA[1]]></user_id>
      <name><![CDATA[Post Author]]></name>
      <links>
        <link rel="self" href="http://example.com/users/1"/>
        <link rel="example:friends" href="http://example.com/users/1/friends"/>
        <link rel="example:comments" href="http://example.com/users/1/comments"/>
      </links>
    </resource>
    <comments>
      <resource href="http://example.com/comments/1000">
        <comment_id><![CDATA[1000]]></comment_id>
        <dates>
          <created_at><![CDATA[2015-07-18T12:13:00+00:00]]></created_at>
          <accepted_at><![CDATA[2015-07-19T00:00:00+00:00]]></accepted_at>
        </dates>
        <comment><![CDATA[Have no fear, sers, your king is safe.]]></comment>
        <embedded>
          <resource href="http://example.com/users/2" rel="user">
            <user_id><![CDATA[2]]></user_id>
            <name><![CDATA[Barristan Selmy]]></name>
            <links>
              <link rel="self" href="http://example.com/users/2"/>
              <link rel="example:friends" href="http://example.com/users/2/friends"/>
              <link rel="example:comments" href="http://example.com/users/2/comments"/>
            </links>
          </resource>
        </embedded>
        <links>
          <link rel="example:user" href="http://example.com/users/2"/>
          <link rel="self" href="http://example.com/comments/1000"/>
        </links>
      </resource>
    </comments>
  </embedded>
  <links>
    <curies>
      <link rel="resource" href="http://example.com/docs/rels/{rel}">
        <name><![CDATA[example]]></name>
        <templated><![CDATA[true]]></templated>
      </link>
    </curies>
    <link rel="first" href="http://example.com/posts/1"/>
    <link rel="next" href="http://example.com/posts/10"/>
    <link rel="example:author" href="http://example.com/users/1"/>
    <link rel="example:comments" href="http://example.com/posts/9/comments"/>
    <link rel="self" href="http://example.com/posts/9"/>
  </links>
  <meta>
    <author>
      <name><![CDATA[Nil Portugués Calderó]]></name>
      <email><![CDATA[contact@nilportugues.com]]></email>
    </author>
    <is_devel><![CDATA[true]]></is_devel>
  </meta>
</resource>"#;
    assert_eq!(xml, expected);
}

#[test]
fn test_pagination_root_takes_its_self_link() {
    let page = HalPagination::new(vec![SimplePost::new(1, "t", "b", 4)])
        .with_self("/post?page=1")
        .with_next("/post?page=2");

    let xml = to_hal_xml_string(&page, &post_transformer()).expect("serialization succeeds");

    assert!(xml.starts_with(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<resource href=\"/post?page=1\">"
    ));
    assert!(xml.contains("  <count><![CDATA[1]]></count>"));
    assert!(xml.contains("    <resource href=\"/post/1\">"));
    assert!(xml.contains("    <link rel=\"next\" href=\"/post?page=2\"/>"));
}

#[test]
fn test_renderer_registers_pagination_mapping() {
    let serializer = HalSerializer::new(post_transformer(), XmlRenderer);
    assert!(serializer.transformer().mapper().get("HalPagination").is_some());
    assert_eq!(serializer.transformer().mapper().len(), 1);
}

#[test]
fn test_no_mappings_is_an_error() {
    let serializer = HalSerializer::new(HalTransformer::new(Mapper::new()), XmlRenderer);
    let result = serializer.serialize(&SimplePost::new(1, "t", "b", 1));
    assert!(matches!(result, Err(HalError::NoMappings)));
}
